use risk_control_config::config::{self, Config};
use risk_control_config::{AdvancedField, RiskControlConfig};
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_CONFIG_PATH: &str = "configs/risk.yaml";

fn parse_arg(prefix: &str) -> Option<String> {
    env::args()
        .skip(1)
        .find_map(|arg| arg.strip_prefix(prefix).map(str::to_string))
}

fn init_tracing(log_level: Option<&str>) {
    let level = match log_level {
        Some("debug") => Level::DEBUG,
        Some("info") => Level::INFO,
        Some("warn") | Some("warning") => Level::WARN,
        Some("error") => Level::ERROR,
        Some("trace") => Level::TRACE,
        _ => Level::INFO,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    if let Some(path) = parse_arg("--decode=") {
        init_tracing(env::var("RISKCTL_LOG_LEVEL").ok().as_deref());
        return decode_blob(&path);
    }

    let config_path = parse_arg("--config=").unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = match Config::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(config.app.log_level.as_deref());
    info!(
        config = %config_path,
        app = %config.app.name,
        env = %config.app.env,
        strategies = config.strategies.len(),
        "Config loaded"
    );

    for (name, violation) in config.violations() {
        warn!(strategy = name, field = violation.field, "{}", violation.message);
    }

    for (name, risk) in &config.strategies {
        report(name, risk);
        match risk.encode() {
            Ok(json) => println!("{}\t{}", name, json),
            Err(e) => {
                error!(strategy = %name, error = %e, "Failed to encode risk control config");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

fn decode_blob(path: &str) -> ExitCode {
    let risk = match config::load_risk_blob(path) {
        Ok(r) => r,
        Err(e) => {
            error!(path = %path, error = %e, "Failed to load risk control config");
            return ExitCode::FAILURE;
        }
    };

    report(path, &risk);

    let absent: Vec<_> = AdvancedField::ALL
        .iter()
        .filter(|f| !risk.is_set(**f))
        .map(AdvancedField::name)
        .collect();
    if !absent.is_empty() {
        info!(fields = ?absent, "Advanced parameters not configured, engine defaults apply");
    }

    let violations = risk.validate();
    for violation in &violations {
        warn!(field = violation.field, "{}", violation.message);
        println!("{}", violation);
    }

    if violations.is_empty() {
        println!("ok");
    }
    ExitCode::SUCCESS
}

fn report(name: &str, risk: &RiskControlConfig) {
    let basic = risk.basic();
    info!(
        strategy = %name,
        max_positions = basic.max_positions,
        btc_eth_max_leverage = basic.btc_eth_max_leverage,
        altcoin_max_leverage = basic.altcoin_max_leverage,
        min_confidence = basic.min_confidence,
        advanced = risk.set_count(),
        "Risk control config"
    );

    for param in risk.params() {
        info!(strategy = %name, field = %param.field(), value = %param.value(), "Advanced parameter");
    }
}
