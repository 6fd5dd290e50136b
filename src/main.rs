use clap::Parser;
use service_schema::config::descriptor::{load_service, DescriptorFormat};
use service_schema::utils::error::{ErrorKind, SchemaError};
use service_schema::utils::logger;
use service_schema::{CliConfig, ServiceInfo, TriggerKind};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    let format = config
        .format
        .as_deref()
        .map(str::parse::<DescriptorFormat>)
        .transpose()?;

    let service = match load_service(&config.descriptor, format) {
        Ok(service) => service,
        Err(e) => {
            tracing::error!("❌ Descriptor validation failed: {} (kind: {:?})", e, e.root_cause().kind());
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    };

    if config.json {
        println!("{}", serde_json::to_string_pretty(&service)?);
    } else {
        display_summary(&service);
    }

    Ok(())
}

fn exit_code(error: &SchemaError) -> i32 {
    match error.root_cause().kind() {
        ErrorKind::Io => 3,
        ErrorKind::DescriptorFormat => 2,
        _ => 1,
    }
}

fn display_summary(service: &ServiceInfo) {
    println!("✅ Service descriptor is valid");
    println!("📋 Service: {}", service.name());
    if let Some(description) = service.description() {
        println!("  Description: {}", description);
    }
    if let Some(service_type) = service.service_type() {
        println!("  Type: {}", service_type);
    }
    if let Some(team) = service.team() {
        println!("  Team: {}", team);
    }

    let mut tags: Vec<_> = service.tags().iter().collect();
    tags.sort();
    if !tags.is_empty() {
        let tags: Vec<String> = tags.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        println!("  Tags: {}", tags.join(", "));
    }

    println!();
    println!("🧩 Use cases ({}):", service.use_case_keys().len());
    for (key, use_case) in service.use_cases() {
        println!("  {} ({}) [{}]", key, use_case.name(), use_case.criticality());
        if let Some(actor) = use_case.actor() {
            println!("    Actor: {}", actor);
        }
        for trigger in use_case.triggers() {
            println!("    ⚡ {}", trigger.kind());
        }
        for interaction in use_case.external_interactions() {
            let standard = interaction
                .type_interaction_standard()
                .map(|t| format!("{:?}", t))
                .unwrap_or_else(|| "-".to_string());
            println!("    🔗 {} ({})", interaction.keyname(), standard);
        }
    }

    println!();
    println!("⚡ Triggers by kind:");
    for kind in TriggerKind::ALL {
        println!("  {}: {}", kind, service.triggers_of_kind(kind).len());
    }
}
