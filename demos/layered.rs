//! Example showing a layered install with an umbrella bar

use color_eyre::Result;
use ezpl::progress::{Progress, StageDescriptor};
use ezpl::Ezpl;
use std::sync::OnceLock;
use std::thread::sleep;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// The one process-wide instance lives here, at the entry point.
static EZPL: OnceLock<Ezpl> = OnceLock::new();

fn ezpl() -> Result<&'static Ezpl> {
    if let Some(ezpl) = EZPL.get() {
        return Ok(ezpl);
    }
    let ezpl = Ezpl::builder().log_level("debug").build()?;
    Ok(EZPL.get_or_init(|| ezpl))
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let ezpl = ezpl()?;
    ezpl.add_separator()?;
    ezpl.printer().system("Preparing installation");
    ezpl.wizard().info_panel("Plan", "Download the archive\nUnpack and link\nVerify");

    let stages = vec![
        StageDescriptor::main("main", "Install").with_step_labels(["Fetching", "Installing", "Verifying"]),
        StageDescriptor::download("fetch", "Download", 2 * 1024 * 1024).with_filename("pkg.tar.gz"),
        StageDescriptor::steps(
            "setup",
            "Setup",
            [("Unpack", "Unpacking files"), ("Link", "Linking binaries"), ("Clean", "Cleaning up")],
        ),
        StageDescriptor::spinner("verify", "Verify"),
    ];

    {
        let session = ezpl.layered_progress(&stages, true)?;
        for _ in 0..16 {
            session.update_layer("fetch", Progress::Advance(128 * 1024), None)?;
            sleep(Duration::from_millis(60));
        }
        session.complete_layer("fetch")?;

        for _ in 0..3 {
            sleep(Duration::from_millis(300));
            session.advance_layer("setup", None)?;
        }

        session.update_layer("verify", Progress::Label, Some("checking signatures"))?;
        sleep(Duration::from_millis(500));
        session.complete_layer("verify")?;
    }

    {
        let _indent = ezpl.manage_indent();
        ezpl.printer().success("Installed pkg");
        ezpl.logger().success("Installed pkg")?;
        for (ctx, dep) in ezpl.wizard().dependency_progress(["serde", "tracing", "indicatif"]) {
            ezpl.printer().deps(format!("{ctx} {dep}"));
            sleep(Duration::from_millis(150));
        }
    }

    ezpl.wizard()
        .status_table(&[("archive", "ok"), ("binaries", "installed"), ("docs", "missing")], Some("Summary"));
    ezpl.printer().tip(format!("Log written to {}", ezpl.log_file().display()));

    Ok(())
}
