use delaycoach_core::{Config, Database};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    db.reset_all()?;
    Config::default().save()?;
    println!("All tasks, check-ins and settings reset");
    Ok(())
}
