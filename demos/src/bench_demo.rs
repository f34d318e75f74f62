//! Shows `benchkit::bench_expr`, the `#[benchkit::bench]` attribute macro,
//! CLI-driven configuration, and the pretty-printer / CSV / JSON output
//! paths, analogous to `divan`'s `examples/benches/*.rs`.

use benchkit::cli::CliArgs;
use benchkit::output::csv::{write_environment_csv, write_samples_csv, CsvWriteOptions};
use benchkit::output::json::to_json;
use benchkit::tree_painter::Printer;
use benchkit::{AllocProfiler, Environment};

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

#[benchkit::bench]
fn fibonacci_10() -> u64 {
    fn fib(n: u64) -> u64 {
        if n < 2 {
            n
        } else {
            fib(n - 1) + fib(n - 2)
        }
    }
    std::hint::black_box(fib(std::hint::black_box(10)))
}

fn main() {
    let config = CliArgs::parse_args().into_config();

    let results = benchkit::execute(&mut fibonacci_10(), config).expect("benchmark failed");
    let summary = results.summarize().expect("at least one sample is always retained");

    let stdout = std::io::stdout();
    let mut printer = Printer::new(stdout.lock());
    printer.print_flags(&results).unwrap();
    printer.print_header().unwrap();
    printer.print_summary("fibonacci_10", &summary).unwrap();

    let env = Environment::capture("demo-run", "2026-07-28T00:00:00Z");
    let mut env_csv = Vec::new();
    write_environment_csv(&mut env_csv, &env, CsvWriteOptions::default()).unwrap();
    print!("{}", String::from_utf8(env_csv).unwrap());

    let mut samples_csv = Vec::new();
    write_samples_csv(&mut samples_csv, &results.samples, CsvWriteOptions::default()).unwrap();
    print!("{}", String::from_utf8(samples_csv).unwrap());

    println!("{}", to_json(&results).unwrap());
}
