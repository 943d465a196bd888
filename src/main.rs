use anyhow::Result;
use clap::Parser;
use eventpolicy::catalog::MethodCatalog;
use eventpolicy::cli::Cli;
use eventpolicy::config::ResolverConfig;
use eventpolicy::event_set::MethodEvents;
use eventpolicy::report;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Load the config file (if any) and apply command-line overrides
fn load_config(args: &Cli) -> Result<ResolverConfig> {
    let mut config = match &args.config {
        Some(path) => ResolverConfig::from_file(path)?,
        None => ResolverConfig::default(),
    };

    if let Some(level) = args.default_level {
        config.levels.default = level;
    }
    if let Some(level) = args.exception_level {
        config.levels.exception = level;
    }
    if let Some(first) = args.first_id {
        config.ids.first_event_id = first;
    }

    Ok(config)
}

/// Keep only the events of `method` (Type::method), if one was requested
///
/// The whole catalog is still resolved so ids match a full run.
fn select_events(
    catalog: &MethodCatalog,
    events: Vec<MethodEvents>,
    method: Option<&str>,
) -> Result<Vec<MethodEvents>> {
    let Some(name) = method else {
        return Ok(events);
    };

    let Some(found) = catalog.find(name) else {
        anyhow::bail!("Method {} not found in catalog", name);
    };

    Ok(events
        .into_iter()
        .filter(|e| e.type_name == found.declaring_type.name && e.method == found.name)
        .collect())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = load_config(&args)?;
    let catalog = MethodCatalog::from_file(&args.catalog)?;

    let resolver = config.resolver();
    let mut ids = config.id_allocator();
    let events = catalog.resolve_events(&resolver, &mut ids)?;
    let events = select_events(&catalog, events, args.method.as_deref())?;

    print!("{}", report::render(&events, args.format)?);

    Ok(())
}
