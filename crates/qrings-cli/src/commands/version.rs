//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - Quantum Rings backend inspection and coupling-map rendering",
        style("qrings").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qrings-hal            Credentials, provider and backend contracts");
    println!("  qrings-adapter-cloud  Quantum Rings cloud REST adapter");
    println!("  qrings-viz            Coupling-map layout and PNG rendering");
    println!("  qrings-cli            Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
