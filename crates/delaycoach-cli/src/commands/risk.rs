use delaycoach_core::get_risk_level;

pub fn run(score: u8) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", get_risk_level(score));
    Ok(())
}
