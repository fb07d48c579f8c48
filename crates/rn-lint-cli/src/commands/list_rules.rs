//! List rules command implementation.

use rn_lint_core::Config;
use rn_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<25} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules(&Config::default()) {
        println!(
            "{:<10} {:<25} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nConfigure rules in rn-lint.toml, e.g.:");
    println!("  [rules.no-raw-text]");
    println!("  skip = [\"Title\", \"Button\"]");
    println!("\nOr pass components on the command line:");
    println!("  rn-lint check --skip Title --skip Button");
}
