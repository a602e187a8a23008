use counter::{Console, run_script};
use recall_core::{Runtime, RuntimeConfig};
use recall_devtools::Inspector;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let console = Console::stdout();
    let mut runtime = Runtime::with_config(RuntimeConfig::new().name("counter"));
    let mut inspector = Inspector::new();
    if log::log_enabled!(log::Level::Info) {
        inspector.hud.toggle_inspector();
    }

    run_script(&mut runtime, &mut inspector, &console)?;
    log::debug!("render history: {}", inspector.to_json());
    Ok(())
}
