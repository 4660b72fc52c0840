//! Picks the contest a user most likely means when none was named.

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::error::ApiError;
use crate::model::Contest;

/// Returns [`best_contest_at`] the current local time.
pub fn best_contest(contests: Vec<Contest>) -> Result<Contest, ApiError> {
    best_contest_at(contests, &Local::now())
}

/// Picks a contest with a cascade of increasingly permissive tie-breaks:
///
/// 1. the only contest, if there is exactly one;
/// 2. the only running contest (two running ones are ambiguous);
/// 3. the only contest starting today;
/// 4. the earliest contest, if it is scheduled and has not started;
/// 5. the latest started contest.
///
/// The stage order decides ties and must not change.
pub fn best_contest_at<Tz: TimeZone>(
    mut contests: Vec<Contest>,
    now: &DateTime<Tz>,
) -> Result<Contest, ApiError> {
    if contests.len() <= 1 {
        return contests.pop().ok_or(ApiError::NoContests);
    }

    let mut running = contests.iter().filter(|c| c.is_running_at(now));
    match (running.next(), running.next()) {
        (Some(contest), None) => return Ok(contest.clone()),
        (Some(_), Some(_)) => return Err(ApiError::AmbiguousContest),
        _ => {}
    }

    if contests.iter().all(Contest::is_unscheduled) {
        return Err(ApiError::NoScheduledContest);
    }

    let today = now.with_timezone(&Local).date_naive();
    let mut starting_today = contests
        .iter()
        .filter(|c| c.start_time().local_date() == Some(today));
    if let (Some(contest), None) = (starting_today.next(), starting_today.next()) {
        return Ok(contest.clone());
    }

    contests.sort_by_key(Contest::start_time);
    let now = now.with_timezone(&Utc);
    if let Some(start) = contests[0].start_time().time() {
        if start.with_timezone(&Utc) > now {
            return Ok(contests.swap_remove(0));
        }
    }

    contests.pop().ok_or(ApiError::NoContests)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::time::{ApiRelTime, ApiTime};

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2020, 3, 1, 12, 0, 0).unwrap()
    }

    fn at(now: &DateTime<Local>, hours: i64) -> ApiTime {
        ApiTime::new((*now + Duration::hours(hours)).with_timezone(now.offset()))
    }

    fn contest(id: &str, start: ApiTime) -> Contest {
        Contest::new(id, id, start, ApiRelTime::from_millis(3_600_000))
    }

    fn scheduled(id: &str, hours: i64) -> Contest {
        contest(id, at(&noon(), hours))
    }

    fn unscheduled(id: &str) -> Contest {
        contest(id, ApiTime::default())
    }

    fn best_id(contests: Vec<Contest>) -> String {
        best_contest_at(contests, &noon()).unwrap().id().clone()
    }

    #[test]
    fn no_contests() {
        assert!(matches!(
            best_contest_at(vec![], &noon()),
            Err(ApiError::NoContests)
        ));
    }

    #[test]
    fn single_contest_is_taken_as_is() {
        assert_eq!(best_id(vec![unscheduled("only")]), "only");
        assert_eq!(best_id(vec![scheduled("past", -100)]), "past");
    }

    #[test]
    fn running_contest_wins() {
        let contests = vec![
            scheduled("tomorrow", 24),
            scheduled("running", 0),
            scheduled("today", 3),
        ];
        assert_eq!(best_id(contests), "running");
    }

    #[test]
    fn running_interval_is_half_open() {
        assert!(scheduled("starting", 0).is_running_at(&noon()));
        assert!(!scheduled("ended", -1).is_running_at(&noon()));
        assert!(!unscheduled("tbd").is_running_at(&noon()));
    }

    #[test]
    fn two_running_contests_are_ambiguous() {
        let long = Contest::new("long", "long", at(&noon(), -2), ApiRelTime::from_millis(5 * 3_600_000));
        let contests = vec![long, scheduled("short", 0), scheduled("later", 30)];
        assert!(matches!(
            best_contest_at(contests, &noon()),
            Err(ApiError::AmbiguousContest)
        ));
    }

    #[test]
    fn all_unscheduled() {
        let contests = vec![unscheduled("a"), unscheduled("b")];
        assert!(matches!(
            best_contest_at(contests, &noon()),
            Err(ApiError::NoScheduledContest)
        ));
    }

    #[test]
    fn only_contest_starting_today() {
        let contests = vec![
            scheduled("yesterday", -30),
            scheduled("today", 3),
            scheduled("tomorrow", 30),
        ];
        assert_eq!(best_id(contests), "today");
    }

    #[test]
    fn earliest_future_contest() {
        let contests = vec![scheduled("later", 60), scheduled("sooner", 30)];
        assert_eq!(best_id(contests), "sooner");
    }

    #[test]
    fn latest_past_contest() {
        let contests = vec![scheduled("recent", -30), scheduled("old", -60)];
        assert_eq!(best_id(contests), "recent");
    }

    #[test]
    fn two_today_fall_through_to_latest() {
        let contests = vec![scheduled("evening", 3), scheduled("morning", -3)];
        assert_eq!(best_id(contests), "evening");
    }

    #[test]
    fn unscheduled_sorts_first_and_falls_through() {
        let contests = vec![
            scheduled("later", 60),
            unscheduled("tbd"),
            scheduled("sooner", 30),
        ];
        assert_eq!(best_id(contests), "later");
    }
}
