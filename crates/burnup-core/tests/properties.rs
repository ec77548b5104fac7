use burnup_core::event::{Action, ActionKind, CardRef, CreateCardData, ListRef};
use burnup_core::model::card::{Card, CardId};
use burnup_core::model::label::LabelCatalog;
use burnup_core::replay::Replay;
use burnup_core::report::{
    BreakInterval, Projection, ReportWindow, ScopeSchedule, cumulative_actual, event_stream,
};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

fn origin() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn window(days: i64, break_days: Option<(i64, i64)>) -> ReportWindow {
    let start = NaiveDate::from_ymd_opt(2025, 9, 1).expect("valid date");
    ReportWindow::new(
        start,
        start + Duration::days(days),
        break_days.map(|(s, e)| BreakInterval {
            start: start + Duration::days(s),
            end: start + Duration::days(e),
        }),
    )
    .expect("valid window")
}

/// `(points, created_hour, completed_after_hours)`
fn arb_cards() -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(
        (1u32..21, -48i64..720, prop::option::of(0i64..480)),
        0..40,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (points, created, done_after))| {
                let creation_time = origin() + Duration::hours(created);
                Card {
                    id: CardId::new(format!("c{i}")),
                    name: format!("Card {i}"),
                    creation_time,
                    completion_time: done_after.map(|h| creation_time + Duration::hours(h)),
                    story_points: points,
                    closed: false,
                }
            })
            .collect()
    })
}

fn snapshot_action(hour: i64, name: &str, closed: bool) -> Action {
    Action {
        id: None,
        date: Some(origin() + Duration::hours(hour)),
        kind: ActionKind::UpdateCard(
            serde_json::from_value(serde_json::json!({
                "card": {"id": "c1", "name": name, "closed": closed}
            }))
            .expect("valid update payload"),
        ),
    }
}

fn create_action() -> Action {
    Action {
        id: None,
        date: Some(origin()),
        kind: ActionKind::CreateCard(CreateCardData {
            card: CardRef {
                id: CardId::new("c1"),
                name: "initial".into(),
            },
            list: ListRef {
                id: None,
                name: "To Do".into(),
            },
        }),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn actual_series_is_monotonic(cards in arb_cards()) {
        let window = window(60, None);
        let series = cumulative_actual(&window, &event_stream(&cards));

        prop_assert_eq!(series.first().map(|p| p.day), Some(0));
        for pair in series.windows(2) {
            prop_assert!(pair[0].day < pair[1].day);
            prop_assert!(pair[0].value <= pair[1].value);
        }
    }

    #[test]
    fn actual_series_ends_at_completed_total(cards in arb_cards()) {
        let window = window(60, None);
        let series = cumulative_actual(&window, &event_stream(&cards));
        let expected: i64 = cards
            .iter()
            .filter(|c| c.completion_time.is_some())
            .map(|c| i64::from(c.story_points))
            .sum();
        prop_assert_eq!(series.last().map(|p| p.value), Some(expected));
    }

    #[test]
    fn last_update_wins(updates in prop::collection::vec(("[a-z]{1,8}", any::<bool>()), 1..20)) {
        let mut chronological = vec![create_action()];
        for (i, (name, closed)) in updates.iter().enumerate() {
            let hour = i64::try_from(i).expect("small index") + 1;
            chronological.push(snapshot_action(hour, name, *closed));
        }
        chronological.reverse();

        let replay = Replay::run(&LabelCatalog::new(), &chronological);
        let card = replay.get(&CardId::new("c1")).expect("card exists");
        let (last_name, last_closed) = updates.last().expect("non-empty");
        prop_assert_eq!(&card.name, last_name);
        prop_assert_eq!(card.closed, *last_closed);
        prop_assert_eq!(card.creation_time, origin());
    }

    #[test]
    fn projection_hits_total_and_holds_during_break(
        end in 2i64..120,
        total in 0i64..500,
        break_at in 0.0f64..1.0,
        break_len in 0.0f64..1.0,
    ) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
        let bs = (break_at * end as f64) as i64;
        #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
        let be = bs + (break_len * (end - bs) as f64) as i64;
        let projection = Projection::new(&window(end, Some((bs, be))), total);

        #[allow(clippy::cast_precision_loss)]
        let total_f = total as f64;
        prop_assert!((projection.value_at(end) - total_f).abs() < f64::EPSILON);
        prop_assert!((projection.value_at(bs) - projection.value_at(be)).abs() < 1e-9);
        prop_assert!(projection.value_at(-1).abs() < f64::EPSILON);
        for day in 0..end {
            prop_assert!(projection.value_at(day) <= projection.value_at(day + 1) + 1e-9);
        }
    }

    #[test]
    fn absolute_schedule_round_trips(entries in prop::collection::vec((0i64..10, 0i64..200), 1..8)) {
        let mut day = 0;
        let text = entries
            .iter()
            .map(|(gap, scope)| {
                day += gap;
                format!("{day},{scope}")
            })
            .collect::<Vec<_>>()
            .join(";");

        let schedule: ScopeSchedule = text.parse().expect("valid schedule");
        prop_assert_eq!(schedule.to_string(), text);
        prop_assert_eq!(schedule.total(), entries.last().map_or(0, |e| e.1));
    }
}
