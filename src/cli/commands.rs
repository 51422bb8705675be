//! CLI Command Implementations
//!
//! Each command stages the named WAV files as arrays "a" and "b" in a
//! [`MemoryHost`], drives the control surface, and writes results back
//! out. Library errors stay typed; this layer adds file context for
//! the terminal.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::control::{script, Dispatcher};
use crate::host::MemoryHost;
use crate::wave;

/// Load one WAV file into the host under the given array name.
fn stage_array(host: &mut MemoryHost, name: &str, path: &Path) -> Result<u32> {
    let imported = wave::import_wav(path)
        .with_context(|| format!("importing {}", path.display()))?;
    let rate = imported.sample_rate;
    host.insert_samples(name, imported.samples);
    host.set_array_rate(name, rate as f32);
    Ok(rate)
}

/// Run a JSON edit script against a pair of WAV files.
pub fn apply(
    a: &Path,
    b: &Path,
    script_path: &Path,
    out_a: Option<&Path>,
    out_b: Option<&Path>,
) -> Result<()> {
    info!("applying {} to A={} B={}", script_path.display(), a.display(), b.display());

    let mut host = MemoryHost::new();
    let a_rate = stage_array(&mut host, "a", a)?;
    let b_rate = stage_array(&mut host, "b", b)?;

    let ops = script::load_script(script_path)
        .with_context(|| format!("loading script {}", script_path.display()))?;

    let mut dispatcher = Dispatcher::new("a", "b");
    let outcome = script::run_script(&mut dispatcher, &host, &ops);

    println!(
        "script finished: {} applied, {} failed",
        outcome.applied, outcome.failed
    );
    for message in host.errors() {
        eprintln!("error: {}", message);
    }

    // buffer B may have been renamed mid-script; whatever array it
    // points at now is what gets written out as B
    let b_name = dispatcher.pair().b_name().to_string();
    let a_samples = host.samples("a").context("array \"a\" disappeared")?;
    let b_samples = host
        .samples(&b_name)
        .with_context(|| format!("array \"{}\" does not exist", b_name))?;

    let a_out = out_a.unwrap_or(a);
    let b_out = out_b.unwrap_or(b);
    wave::export_wav(a_out, &a_samples, a_rate)
        .with_context(|| format!("writing {}", a_out.display()))?;
    wave::export_wav(b_out, &b_samples, b_rate)
        .with_context(|| format!("writing {}", b_out.display()))?;

    println!("wrote {} and {}", a_out.display(), b_out.display());
    Ok(())
}

/// Print the pair report for two WAV files.
pub fn print_info(a: &Path, b: &Path) -> Result<()> {
    let mut host = MemoryHost::new();
    stage_array(&mut host, "a", a)?;
    stage_array(&mut host, "b", b)?;

    let dispatcher = Dispatcher::new("a", "b");
    let report = dispatcher
        .pair()
        .info(&host)
        .context("resolving the buffer pair")?;

    println!("buffer A ({}):", a.display());
    println!("  frames: {}", report.a.frames);
    println!("  sample rate: {} Hz", report.a.sample_rate);
    println!("buffer B ({}):", b.display());
    println!("  frames: {}", report.b.frames);
    println!("  sample rate: {} Hz", report.b.sample_rate);

    Ok(())
}
