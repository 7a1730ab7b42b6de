use crate::config::Command;
use crate::core::directory::{NurseChanges, NurseDirectory, RegistrationForm};
use crate::core::{NurseAccount, NurseRepository};
use crate::utils::error::{HospitalError, Result};
use std::io::Write;

/// 指令執行結果；登入失敗不算錯誤，但要讓 CLI 以非零碼結束
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    LoginRejected,
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Success => 0,
            Outcome::LoginRejected => 4,
        }
    }
}

fn print_accounts<W: Write>(out: &mut W, accounts: &[NurseAccount]) -> Result<()> {
    if accounts.is_empty() {
        writeln!(out, "no nurses found")?;
    }
    for account in accounts {
        writeln!(out, "{}", account)?;
    }
    Ok(())
}

fn require_password(password: Option<String>) -> Result<String> {
    password.ok_or_else(|| HospitalError::validation("password is required"))
}

pub async fn execute<R, W>(
    directory: &NurseDirectory<R>,
    command: Command,
    out: &mut W,
) -> Result<Outcome>
where
    R: NurseRepository,
    W: Write,
{
    match command {
        Command::List => {
            let nurses = directory.list().await?;
            print_accounts(out, &nurses)?;
        }
        Command::Show { id } => {
            let account = directory.show(id).await?;
            writeln!(out, "{}", account)?;
            writeln!(out, "profile: {}", account.profile)?;
        }
        Command::Search { query } => {
            let hits = directory.search(&query).await?;
            print_accounts(out, &hits)?;
        }
        Command::FindName { name } => {
            let account = directory
                .find_by_name(&name)
                .await?
                .ok_or_else(|| HospitalError::not_found(format!("name '{}'", name)))?;
            writeln!(out, "{}", account)?;
        }
        Command::FindUser { user } => {
            let account = directory
                .find_by_user(&user)
                .await?
                .ok_or_else(|| HospitalError::not_found(format!("user '{}'", user)))?;
            writeln!(out, "{}", account)?;
        }
        Command::Login { user, password } => {
            let password = require_password(password)?;
            if directory.authenticate(&user, &password).await? {
                writeln!(out, "login ok")?;
            } else {
                writeln!(out, "login failed")?;
                return Ok(Outcome::LoginRejected);
            }
        }
        Command::Register {
            name,
            surname,
            email,
            username,
            password,
            profile,
        } => {
            let form = RegistrationForm {
                name,
                surname,
                email,
                username: username.clone(),
                password: require_password(password)?,
                profile,
            };
            directory.register(form).await?;
            writeln!(out, "registered {}", username.trim())?;
        }
        Command::Update {
            id,
            name,
            surname,
            email,
            username,
            password,
            profile,
        } => {
            let changes = NurseChanges {
                name,
                surname,
                email,
                user: username,
                password,
                profile,
            };
            if changes.is_empty() {
                return Err(HospitalError::validation("nothing to update"));
            }
            let updated = directory.update(id, changes).await?;
            writeln!(out, "{}", updated)?;
        }
        Command::Delete { id } => {
            directory.delete(id).await?;
            writeln!(out, "deleted #{}", id)?;
        }
    }

    Ok(Outcome::Success)
}
