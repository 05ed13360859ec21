// Koan demo suite: a small mixed pass/fail suite driving the CLI launcher.
// Usage: cargo run --bin demo [paths...] [--format console|json|junit]
//
// The "strings" spec contains one deliberately failing example so the
// non-zero exit path stays exercised; running the "arithmetic" path alone
// exits cleanly.

use koan::prelude::*;

#[derive(Debug)]
struct DivisionByZero;

fn divide(a: i32, b: i32) -> i32 {
    if b == 0 {
        std::panic::panic_any(DivisionByZero);
    }
    a / b
}

fn register(runner: &mut Runner) {
    runner.describe("arithmetic", |spec| {
        spec.it("adds small integers", |_| {
            expect(&(2 + 2)).equals(4);
        });

        spec.context("division", |spec| {
            spec.it("divides evenly", |_| {
                expect(&divide(12, 3)).equals(4);
            });
            spec.it("panics on zero divisors", |_| {
                expect_panic::<DivisionByZero>(|| {
                    divide(1, 0);
                });
            });
        });

        spec.it("orders magnitudes", |_| {
            expect(&42).greater_than(10);
            expect(&42).less_or_equal(42);
        });
    });

    runner.describe("strings", |spec| {
        spec.it("finds substrings", |_| {
            expect("hello world").contains("wor");
        });
        spec.it("matches greetings", |_| {
            expect("hello world").matches_regex("hel+o");
        });
        spec.it("cleans up scratch files", |example| {
            let path = std::env::temp_dir().join("koan-demo-scratch.txt");
            std::fs::write(&path, "42").expect("scratch file should be writable");
            let scratch = path.clone();
            example.cleanup(move || {
                let _ = std::fs::remove_file(&scratch);
            });
            let content = std::fs::read_to_string(&path).expect("scratch file should read back");
            expect(&content).equals("42");
        });
        // Deliberately failing, to keep the failure reporting honest.
        spec.it("greets the universe", |_| {
            expect("hello world").contains("universe");
        });
    });
}

fn main() {
    let mut runner = Runner::new();
    register(&mut runner);
    koan::cli::run(runner);
}
