// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the propbind crate.
//!
//! This example demonstrates:
//! - Declaring a bindable record with `bindable!`
//! - Layering defaults, a YAML file, environment variables and arguments
//! - A second round that leaves committed fields alone
//!
//! To run this example:
//! ```bash
//! # Set some environment variables
//! export OPT_B="8888"
//!
//! # Run the example, passing arguments after --
//! cargo run --example basic_usage -- opt_c=true
//! ```

use propbind::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Default)]
struct Configuration {
    option_a: String,
    option_b: i64,
    option_c: bool,
}

propbind::bindable!(Configuration {
    option_a: text = ("OPT_A", "unfilled"),
    option_b: integer = ("OPT_B", "4444"),
    option_c: boolean = ("OPT_C", "false"),
});

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== propbind: Basic Usage ===\n");

    let mut config = Configuration::default();
    let mut binder = PropertyBinder::new(&mut config)?;

    // Example 1: Defaults only
    println!("--- Example 1: Defaults ---");
    binder.apply_defaults()?;
    binder.commit(&mut config);
    println!("{:?}\n", config);

    // Example 2: Layer the environment and the process arguments
    println!("--- Example 2: Environment, then arguments ---");
    let mut config = Configuration::default();
    let mut binder = PropertyBinder::new(&mut config)?;
    binder.apply_defaults()?;
    binder.apply_env()?;
    binder.apply(&mut ArgsSource::from_env_args())?;
    let written = binder.commit(&mut config);
    println!("Wrote {} fields: {:?}\n", written, config);

    // Example 3: A YAML file, if one exists at the OS config location
    println!("--- Example 3: Standard plan ---");
    let mut config = Configuration::default();
    let mut plan = BindingPlan::standard("propbind-demo", "com.example");
    println!("Plan: {:?}", plan);
    let mut catalog = plan.bind(&mut config)?;
    println!("{:?}\n", config);

    // Example 4: Defaults in a second round mark committed fields skipped
    println!("--- Example 4: Second round ---");
    let mut round_two = BindingPlan::new()
        .with_defaults()
        .with_callback(|| {
            let mut values = HashMap::new();
            values.insert("opt_a".to_string(), "from callback".to_string());
            Ok::<_, std::io::Error>(values)
        });
    let written = round_two.apply(&mut catalog, &mut config)?;
    println!("Wrote {} fields: {:?}", written, config);

    for field in catalog.fields() {
        println!(
            "  {} ({}): committed={} skipped={}",
            field.name(),
            field.kind(),
            catalog.is_committed(field.name()),
            field.is_skipped()
        );
    }

    Ok(())
}
