/*!
 * Process & Resource Manager - Main Entry Point
 *
 * Runs a command script (init, cr, de, req, rel, to, quit) against a fresh
 * kernel and writes one transcript line per command.
 */

use clap::Parser;
use prm_kernel::{init_tracing, shell, DriverConfig};
use tracing::error;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = DriverConfig::parse();
    if let Err(e) = shell::run(&config) {
        error!(error = %e, "driver failed");
        return Err(e);
    }
    Ok(())
}
