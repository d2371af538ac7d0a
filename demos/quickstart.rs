use chrono::Duration;
use zonetime::{CalendarInterval, TimezoneError, ZonedInstant};

fn main() -> Result<(), TimezoneError> {
    let here = ZonedInstant::now("Europe/Madrid")?;
    let there = here.convert_to_zone("Asia/Tokyo")?;

    println!("{here}");
    println!("{there}");
    println!("equal: {}", here == there);

    let launch = here.add(-Duration::days(900));
    let elapsed = CalendarInterval::between_instants(&launch, &here)?;
    println!("elapsed since launch: {}", elapsed.duration_summary());

    Ok(())
}
