//! Briefing command: a fan's day at a glance.

use anyhow::Result;
use fz_core::FanBriefing;
use fz_core::fixture::validate_records;

use crate::Source;

/// Assembles the briefing for `fan_id` on the source's simulated date.
pub fn build(source: &Source, fan_id: u32) -> Result<FanBriefing> {
    let date = source.current_date()?;
    let fan = source.fan(fan_id)?;
    let (matches, _) = validate_records(&source.matches()?);
    let hotels = source.hotels()?;
    let stadiums = source.stadiums()?;
    Ok(FanBriefing::build(&fan, date, &matches, &hotels, &stadiums))
}

/// Runs the briefing command.
pub fn run(source: &Source, fan_id: u32) -> Result<()> {
    print!("{}", build(source, fan_id)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    const GAMES: &str = r#"[
        {"id": 1, "team_a": "Saudi Arabia", "team_b": "Japan", "date": "2034-06-12",
         "time": "18:00", "stadium_id": 1, "stage": "group", "group": "A",
         "result": {"score_a": 2, "score_b": 0}, "winner": "Saudi Arabia"},
        {"id": 2, "team_a": "Brazil", "team_b": "Ghana", "date": "2034-06-13",
         "time": "21:00", "stadium_id": 1, "stage": "group", "group": "B",
         "result": null, "winner": null},
        {"id": 3, "team_a": "Saudi Arabia", "team_b": "Peru", "date": "2034-06-17",
         "time": "18:00", "stadium_id": 1, "stage": "group", "group": "A",
         "result": null, "winner": null}
    ]"#;

    const FANS: &str = r#"[
        {"id": 1, "name": "Layla", "nationality": "Saudi", "team_supported": "Saudi Arabia",
         "attending_games": [3, 1],
         "hotel_stays": [{"hotel_id": 1, "check_in": "2034-06-10", "check_out": "2034-06-15"}],
         "preferences": {"budget": "mid"}}
    ]"#;

    #[test]
    fn briefing_from_fixture_store() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("games.json"), GAMES).unwrap();
        std::fs::write(temp.path().join("fans.json"), FANS).unwrap();
        std::fs::write(
            temp.path().join("hotels.json"),
            r#"[{"id": 1, "name": "Desert Rose", "city": "Riyadh"}]"#,
        )
        .unwrap();
        std::fs::write(
            temp.path().join("stadiums.json"),
            r#"[{"id": 1, "name": "King Fahd Stadium", "city": "Riyadh"}]"#,
        )
        .unwrap();
        std::fs::write(temp.path().join("date.json"), r#"{"date": "2034-06-13"}"#).unwrap();

        let source = Source::local(temp.path()).unwrap();
        let briefing = build(&source, 1).unwrap();

        assert_snapshot!(briefing.to_string(), @r"
        Date: 2034-06-13
        Fan: Layla (Saudi), supporting Saudi Arabia
        Current stay: Desert Rose in Riyadh (checking out in 2 days)
        Itinerary: Desert Rose in Riyadh from 2034-06-10 to 2034-06-15
        Attending: Past match on 2034-06-12: Saudi Arabia vs Japan at King Fahd Stadium; Upcoming match on 2034-06-17: Saudi Arabia vs Peru at King Fahd Stadium
        Today: Brazil vs Ghana at King Fahd Stadium, 21:00
        Preferences: budget: mid.
        ");
    }

    #[test]
    fn unknown_fan_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let source = Source::local(temp.path()).unwrap();
        assert!(build(&source, 42).is_err());
    }
}
