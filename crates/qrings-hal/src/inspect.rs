//! Diagnostic dump of a connected provider and backend.
//!
//! Output is plain text meant for people, not for parsing. Attribute
//! errors are reported inline and never stop the enumeration.

use std::io::{self, Write};
use std::path::PathBuf;

use crate::backend::{AttributeValue, BACKEND_ATTRIBUTES, Backend};
use crate::provider::Provider;

/// Sequences longer than this print only their head and tail.
pub const TRUNCATE_AT: usize = 50;

/// Directories searched for executables and tooling, in priority order:
/// the executable's own directory, the working directory, then `PATH`.
pub fn search_path() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
    {
        paths.push(dir);
    }
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd);
    }
    if let Some(path) = std::env::var_os("PATH") {
        paths.extend(std::env::split_paths(&path));
    }
    paths
}

/// Render one `name = value` line, truncating long sequences.
pub fn format_attribute(name: &str, value: &AttributeValue) -> String {
    match value.seq_len() {
        Some(len) if len > TRUNCATE_AT => format!(
            "{name:20} = {}\n...\n{}\n",
            value.slice(0, TRUNCATE_AT),
            value.slice(len - TRUNCATE_AT, len)
        ),
        _ => format!("{name:20} = {value}"),
    }
}

/// Write every public attribute of `backend`, sorted by name.
pub fn write_attributes<W: Write>(out: &mut W, backend: &dyn Backend) -> io::Result<()> {
    let mut names: Vec<&str> = BACKEND_ATTRIBUTES.to_vec();
    names.sort_unstable();

    for name in names {
        match backend.attribute(name) {
            Ok(value) => writeln!(out, "{}", format_attribute(name, &value))?,
            Err(e) => writeln!(out, "{name:20} = Error: {e}")?,
        }
    }
    Ok(())
}

/// Write the full diagnostic report.
pub fn describe<W: Write>(
    out: &mut W,
    provider: &dyn Provider,
    backend: &dyn Backend,
) -> io::Result<()> {
    writeln!(out, "\nsearch path =")?;
    for path in search_path() {
        writeln!(out, "{}", path.display())?;
    }

    writeln!(out, "\nplatform = {}", std::env::consts::OS)?;
    writeln!(out, "arch = {}\n", std::env::consts::ARCH)?;

    writeln!(out, "provider = {provider}")?;
    writeln!(out, "backend = {backend}")?;

    let props = backend.properties();
    writeln!(out, "backend.name = {}", props.name)?;
    writeln!(out, "backend.backend_version = {}", props.backend_version)?;
    writeln!(out, "backend.online_date = {}", props.online_date)?;
    writeln!(out, "backend.num_qubits = {}", props.num_qubits)?;
    writeln!(out, "backend.description = {}", props.description)?;

    writeln!(out, "\nAll Backend Attributes:")?;
    writeln!(out, "{}", "-".repeat(50))?;
    write_attributes(out, backend)?;
    writeln!(out)
}

/// Print the diagnostic report to stdout.
pub fn print_report(provider: &dyn Provider, backend: &dyn Backend) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    describe(&mut out, provider, backend)
}
