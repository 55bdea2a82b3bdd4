use clap::Parser;
use middle_c::schema::{self, Catalog};
use middle_c::utils::error::{ErrorSeverity, MiddleError};
use middle_c::utils::{logger, validation::Validate};
use middle_c::{CliConfig, Settings};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    let result = config
        .validate()
        .and_then(|_| config.settings())
        .and_then(|settings| run(&settings));

    if let Err(e) = result {
        tracing::error!(
            "middle-c failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn run(settings: &Settings) -> Result<(), MiddleError> {
    let catalog = Catalog::builtin();

    if settings.list {
        for record in catalog.records() {
            println!("record   {}", record.name);
        }
        for function in catalog.functions() {
            println!("function {}", function.decl());
        }
        return Ok(());
    }

    let output = if settings.all {
        schema::generate_all(&catalog, &settings.options)
    } else {
        schema::generate(&catalog, &settings.options)?
    };

    for u in &output.unmapped {
        tracing::warn!("unmapped {} ({})", u.name, u.arg);
    }

    let serialized = if settings.strict {
        output.into_strict()?
    } else {
        output.serialized
    };

    let rendered = if settings.pretty {
        serde_json::to_string_pretty(&serialized)?
    } else {
        serde_json::to_string(&serialized)?
    };
    println!("{}", rendered);

    Ok(())
}
