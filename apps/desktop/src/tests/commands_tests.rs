use chrono::TimeZone;

use super::*;

#[test]
fn parses_simple_verbs() {
    assert_eq!("sort price".parse::<Command>().expect("sort"), Command::Sort(SortKind::Price));
    assert_eq!(
        "filter Future".parse::<Command>().expect("filter"),
        Command::Filter(FilterKind::Future)
    );
    assert_eq!("fav 12".parse::<Command>().expect("fav"), Command::Favorite(PointId(12)));
    assert_eq!("  quit ".parse::<Command>().expect("quit"), Command::Quit);
}

#[test]
fn set_joins_multi_word_values() {
    let command = "set new destination Saint Petersburg"
        .parse::<Command>()
        .expect("set");
    assert_eq!(
        command,
        Command::Set {
            target: DraftTarget::New,
            edit: DraftEdit::SetDestination("Saint Petersburg".into()),
        }
    );

    let command = "set 3 offer Add meal".parse::<Command>().expect("offer");
    assert_eq!(
        command,
        Command::Set {
            target: DraftTarget::Point(PointId(3)),
            edit: DraftEdit::ToggleOffer {
                title: "Add meal".into()
            },
        }
    );
}

#[test]
fn set_dates_takes_two_timestamps() {
    let command = "set 1 dates 2026-07-01T09:00:00Z 2026-07-01T11:30:00+02:00"
        .parse::<Command>()
        .expect("dates");
    assert_eq!(
        command,
        Command::Set {
            target: DraftTarget::Point(PointId(1)),
            edit: DraftEdit::SetDates {
                from: Utc.with_ymd_and_hms(2026, 7, 1, 9, 0, 0).unwrap(),
                to: Utc.with_ymd_and_hms(2026, 7, 1, 9, 30, 0).unwrap(),
            },
        }
    );
}

#[test]
fn rejects_bad_input() {
    for line in [
        "",
        "teleport",
        "sort fastest",
        "edit one",
        "save",
        "set 1 type rocket",
        "set 1 price -4",
        "set 1 dates yesterday",
        "set 1 colour red",
    ] {
        assert!(line.parse::<Command>().is_err(), "accepted '{line}'");
    }
}
