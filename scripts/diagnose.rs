// scripts/diagnose.rs
use clap::Parser;
use sde_diag::backend::Backend;
use sde_diag::diagnostics::{
    inspect_sample, inspect_strong_order, SampleConfig, StrongOrderConfig,
};
use sde_diag::math_utils::Timer;
use sde_diag::output::write_rate_csv;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Validate SDE integration schemes against the analytical solution"
)]
struct Args {
    /// Force serial execution even when multiple cores are available
    #[arg(long)]
    no_parallel: bool,
}

fn main() {
    let args = Args::parse();
    let backend = Backend::detect(args.no_parallel);

    println!("sde-diag solver diagnostics");
    println!("===========================\n");
    println!("  Date: {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
    println!("  CPU cores: {}", num_cpus::get());
    println!("  Rayon threads: {}", rayon::current_num_threads());
    println!("  Backend: {}\n", backend.name());

    let mut timer = Timer::new();

    println!("Inspecting sample paths...");
    timer.start();
    let sample_cfg = SampleConfig {
        backend,
        ..SampleConfig::default()
    };
    let written = inspect_sample(&sample_cfg).expect("sample-path inspection failed");
    println!(
        "  wrote {} trajectory plots under {} in {:.0} ms\n",
        written.len(),
        sample_cfg.out_dir.display(),
        timer.elapsed_ms()
    );

    println!("Estimating strong convergence order...");
    timer.start();
    let order_cfg = StrongOrderConfig {
        backend,
        ..StrongOrderConfig::default()
    };
    let report = inspect_strong_order(&order_cfg).expect("strong-order estimation failed");
    println!("  step-size sweep finished in {:.0} ms", timer.elapsed_ms());
    for result in &report.results {
        println!(
            "  {:<10} empirical strong order k = {:.4}",
            result.scheme.name(),
            result.order
        );
    }
    println!("  rate plot: {}", report.plot_path.display());

    let columns: Vec<(&str, &[f64])> = report
        .results
        .iter()
        .map(|r| (r.scheme.name(), r.mses.as_slice()))
        .collect();
    let csv_name = format!(
        "convergence_{}.csv",
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    );
    write_rate_csv(&csv_name, &report.dts, &columns).expect("could not write CSV summary");
    println!("  rate table: {}", csv_name);

    println!("\nDiagnostics complete!");
}
