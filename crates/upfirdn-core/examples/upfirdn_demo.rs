//! Resample two small signals and print the results
//!
//! Run with: cargo run --example upfirdn_demo -p upfirdn-core
//!
//! Set `UPFIRDN_CONFIG` to a YAML file to change logging or run a third
//! conversion with the configured rates.

use upfirdn_core::observe::init_logging;
use upfirdn_core::{upfirdn, UpfirdnConfig};

fn print_signal(name: &str, samples: &[f32]) {
    for (i, v) in samples.iter().enumerate() {
        println!("{}[{}]={}", name, i, v);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = UpfirdnConfig::load()?;
    init_logging(&config.logging);

    // Sample-and-hold 3x upsampling
    let x = [1.0_f32, 2.0, 3.0];
    let h = [1.0_f32, 1.0, 1.0];
    print_signal("x", &x);
    let y = upfirdn(&x, &h, 3, 1)?;
    print_signal("y", &y);

    // 4/3 conversion with a triangular interpolation filter
    let x1: Vec<f32> = (1..=10).map(|v| v as f32).collect();
    let h1 = [0.25_f32, 0.5, 0.75, 1.0, 0.75, 0.5, 0.25];
    let y1 = upfirdn(&x1, &h1, 4, 3)?;
    print_signal("y1", &y1);

    if std::env::var(upfirdn_core::config::CONFIG_ENV_VAR).is_ok() {
        let rc = &config.resampler;
        let y2 = rc.run(&x1, &h1)?;
        println!("\n{}/{} with {:?} flush:", rc.up_rate, rc.down_rate, rc.flush);
        print_signal("y2", &y2);
    }

    Ok(())
}
