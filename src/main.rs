use anyhow::Context;
use clap::Parser;
use fatfox_hospital::app::{self, Outcome};
use fatfox_hospital::utils::{logger, validation::Validate};
use fatfox_hospital::{
    BackendKind, Cli, Command, ConfigProvider, HospitalConfig, HospitalError, InMemoryRepository,
    NurseDirectory, NurseRepository, RestRepository,
};

fn prompt_password(command: &mut Command) -> anyhow::Result<()> {
    let (label, slot) = match command {
        Command::Login { user, password } => (user.clone(), password),
        Command::Register {
            username, password, ..
        } => (username.clone(), password),
        _ => return Ok(()),
    };

    if slot.is_none() {
        let entered = rpassword::prompt_password(format!("Enter password for {}: ", label))
            .context("failed to read password from terminal")?;
        *slot = Some(entered);
    }
    Ok(())
}

async fn run_with<R: NurseRepository>(
    repository: R,
    command: Command,
) -> Result<Outcome, HospitalError> {
    let directory = NurseDirectory::new(repository);
    let mut stdout = std::io::stdout().lock();
    app::execute(&directory, command, &mut stdout).await
}

async fn run(config: &HospitalConfig, command: Command) -> Result<Outcome, HospitalError> {
    match config.backend_kind() {
        BackendKind::Memory => {
            let repository = if config.seed_sample_data() {
                InMemoryRepository::with_sample_data()
            } else {
                InMemoryRepository::new()
            };
            run_with(repository, command).await
        }
        BackendKind::Remote => {
            let base_url = config
                .base_url()
                .ok_or_else(|| HospitalError::MissingConfigError {
                    field: "backend.base_url".to_string(),
                })?;
            tracing::info!("🌐 Using hospital backend at {}", base_url);
            let repository = RestRepository::new(base_url)?.with_timeout(config.timeout());
            run_with(repository, command).await
        }
    }
}

fn fail(e: &HospitalError) -> ! {
    tracing::error!("❌ {} (Severity: {:?})", e, e.severity());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(e.severity().exit_code().max(1));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.severity().exit_code().max(1));
        }
    };

    // 初始化日誌
    if config.logging.is_json() {
        logger::init_json_logger(&config.logging.level);
    } else {
        logger::init_cli_logger(&config.logging.level);
    }
    tracing::debug!("Configuration: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(&e);
    }

    prompt_password(&mut cli.command)?;

    match run(&config, cli.command).await {
        Ok(Outcome::Success) => Ok(()),
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => fail(&e),
    }
}
