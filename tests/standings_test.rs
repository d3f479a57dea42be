use league_standings::core::fixtures::PlayerQuery;
use league_standings::domain::model::parse_kickoff;
use league_standings::{
    compute_for_competition, compute_standings, rank_scorers, top_scorers, LeagueError, Match,
    MatchStatus, Player, Position, StandingRow, TableBuilder, Team,
};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn team(id: i64, name: &str) -> Team {
    Team::new(id, name)
}

fn game(id: i64, home: i64, away: i64, score: (i32, i32), status: MatchStatus) -> Match {
    Match {
        id,
        home_team_id: home,
        away_team_id: away,
        home_score: score.0,
        away_score: score.1,
        status,
        date_time: parse_kickoff("2025-11-01T15:00:00").unwrap(),
        venue: None,
        referee: None,
        competition_id: None,
    }
}

fn status_strategy() -> impl Strategy<Value = MatchStatus> {
    prop_oneof![
        Just(MatchStatus::Scheduled),
        Just(MatchStatus::InPlay),
        Just(MatchStatus::Finished),
        Just(MatchStatus::Finished),
    ]
}

/// Teams drawn from a small name pool so equal names show up and the id
/// tie-break gets exercised. Matches only reference existing teams.
fn league_strategy() -> impl Strategy<Value = (Vec<Team>, Vec<Match>)> {
    (2_i64..10)
        .prop_flat_map(|team_count| {
            let names = proptest::collection::vec(
                prop_oneof![
                    Just("FC Thunder"),
                    Just("Royal Eagles"),
                    Just("City Wolves"),
                    Just("Athletic Lions"),
                ],
                team_count as usize,
            );
            let games = proptest::collection::vec(
                (
                    1..=team_count,
                    1..=team_count,
                    0_i32..6,
                    0_i32..6,
                    status_strategy(),
                    proptest::option::of(1_i64..3),
                ),
                0..40,
            );
            (names, games)
        })
        .prop_map(|(names, games)| {
            let teams: Vec<Team> = names
                .into_iter()
                .enumerate()
                .map(|(index, name)| team(index as i64 + 1, name))
                .collect();
            let matches: Vec<Match> = games
                .into_iter()
                .filter(|(home, away, ..)| home != away)
                .enumerate()
                .map(|(index, (home, away, home_goals, away_goals, status, competition))| {
                    let mut m = game(index as i64 + 1, home, away, (home_goals, away_goals), status);
                    m.competition_id = competition;
                    m
                })
                .collect();
            (teams, matches)
        })
}

fn is_sorted(table: &[StandingRow]) -> bool {
    table.windows(2).all(|pair| {
        let (a, b) = (&pair[0], &pair[1]);
        (b.points, b.goal_difference, b.goals_for, &a.team, a.team_id)
            <= (a.points, a.goal_difference, a.goals_for, &b.team, b.team_id)
    })
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn table_totals_follow_finished_results((teams, matches) in league_strategy()) {
        let table = compute_standings(&teams, &matches).unwrap();

        let finished: Vec<&Match> = matches.iter().filter(|m| m.is_finished()).collect();
        let drawn = finished.iter().filter(|m| m.home_score == m.away_score).count() as u32;
        let decisive = finished.len() as u32 - drawn;

        prop_assert_eq!(table.len(), teams.len());
        prop_assert_eq!(table.iter().map(|r| r.played).sum::<u32>(), 2 * finished.len() as u32);
        prop_assert_eq!(table.iter().map(|r| r.points).sum::<u32>(), 3 * decisive + 2 * drawn);
        prop_assert_eq!(
            table.iter().map(|r| r.goals_for).sum::<u64>(),
            table.iter().map(|r| r.goals_against).sum::<u64>()
        );

        for row in &table {
            prop_assert_eq!(row.played, row.won + row.drawn + row.lost);
            prop_assert_eq!(row.goal_difference, row.goals_for as i64 - row.goals_against as i64);
            prop_assert_eq!(row.points, 3 * row.won + row.drawn);
        }

        prop_assert!(is_sorted(&table));
    }

    #[test]
    fn compute_is_idempotent_and_order_independent((teams, matches) in league_strategy()) {
        let first = compute_standings(&teams, &matches).unwrap();
        let second = compute_standings(&teams, &matches).unwrap();
        prop_assert_eq!(&first, &second);

        let mut reversed_teams = teams.clone();
        reversed_teams.reverse();
        let mut reversed_matches = matches.clone();
        reversed_matches.reverse();
        prop_assert_eq!(compute_standings(&reversed_teams, &reversed_matches).unwrap(), first);
    }

    #[test]
    fn unfinished_scores_never_reach_the_table(
        (teams, mut matches) in league_strategy(),
        home_goals in 0_i32..20,
        away_goals in 0_i32..20,
        live in any::<bool>()
    ) {
        let baseline = compute_standings(&teams, &matches).unwrap();

        let status = if live { MatchStatus::InPlay } else { MatchStatus::Scheduled };
        matches.push(game(10_000, 1, 2, (home_goals, away_goals), status));
        prop_assert_eq!(compute_standings(&teams, &matches).unwrap(), baseline);
    }

    #[test]
    fn builder_agrees_with_batch_at_every_prefix(
        (teams, matches) in league_strategy(),
        cut in 0_usize..40
    ) {
        let cut = cut.min(matches.len());
        let mut builder = TableBuilder::new(&teams).unwrap();

        for m in &matches[..cut] {
            builder.record(m).unwrap();
        }
        prop_assert_eq!(builder.rows(), compute_standings(&teams, &matches[..cut]).unwrap());

        for m in &matches[cut..] {
            builder.record(m).unwrap();
        }
        prop_assert_eq!(builder.finish(), compute_standings(&teams, &matches).unwrap());
    }

    #[test]
    fn competition_table_uses_only_its_matches(
        (teams, matches) in league_strategy(),
        competition_id in 1_i64..3
    ) {
        let tagged: Vec<Match> = matches
            .iter()
            .filter(|m| m.competition_id == Some(competition_id))
            .cloned()
            .collect();
        prop_assert_eq!(
            compute_for_competition(&teams, &matches, competition_id).unwrap(),
            compute_standings(&teams, &tagged).unwrap()
        );
    }
}

#[test]
fn test_scenario_from_three_results() {
    let teams = vec![team(1, "A"), team(2, "B"), team(3, "C")];
    let matches = vec![
        game(1, 1, 2, (2, 1), MatchStatus::Finished),
        game(2, 2, 3, (0, 0), MatchStatus::Finished),
        game(3, 1, 3, (1, 3), MatchStatus::Finished),
    ];

    let table = compute_standings(&teams, &matches).unwrap();
    let ranked: Vec<(usize, &str, u32)> = table
        .iter()
        .enumerate()
        .map(|(i, r)| (i + 1, r.team.as_str(), r.points))
        .collect();
    assert_eq!(ranked, vec![(1, "C", 4), (2, "A", 3), (3, "B", 1)]);
}

#[test]
fn test_invalid_references_produce_no_table() {
    let teams = vec![team(1, "A"), team(2, "B")];

    let self_match = vec![
        game(1, 1, 2, (1, 0), MatchStatus::Finished),
        game(2, 2, 2, (0, 0), MatchStatus::Finished),
    ];
    let err = compute_standings(&teams, &self_match).unwrap_err();
    assert!(matches!(err, LeagueError::ValidationError { .. }));

    let unknown = vec![game(1, 3, 1, (1, 0), MatchStatus::Scheduled)];
    let err = compute_standings(&teams, &unknown).unwrap_err();
    assert!(err.to_string().contains("home team 3"));
}

#[test]
fn test_maximum_scores_do_not_overflow_counters() {
    let teams = vec![team(1, "A"), team(2, "B"), team(3, "C"), team(4, "D")];
    let matches: Vec<Match> = (2..=4)
        .map(|away| game(away, 1, away, (i32::MAX, 0), MatchStatus::Finished))
        .collect();

    let table = compute_standings(&teams, &matches).unwrap();
    assert_eq!(table[0].goals_for, 3 * i32::MAX as u64);
    assert_eq!(table[0].goal_difference, 3 * i64::from(i32::MAX));
}

fn player(id: i64, name: &str, team_id: i64, position: Position, goals: u32, assists: u32) -> Player {
    Player {
        id,
        team_id,
        team_name: None,
        full_name: name.to_string(),
        position,
        age: 25,
        nationality: None,
        appearances: 20,
        goals,
        assists,
        yellow_cards: 0,
        red_cards: 0,
    }
}

#[test]
fn test_top_scorer_tie_breaks() {
    let players = vec![
        player(1, "X", 1, Position::Forward, 5, 2),
        player(2, "Y", 1, Position::Forward, 5, 4),
        player(3, "Z", 2, Position::Midfielder, 3, 9),
    ];
    let order: Vec<String> = rank_scorers(&players).into_iter().map(|r| r.full_name).collect();
    assert_eq!(order, vec!["Y", "X", "Z"]);
    assert_eq!(top_scorers(&players, 1)[0].full_name, "Y");
}

#[test]
fn test_player_query_combines_filters() {
    let players = vec![
        player(1, "Marcus Johnson", 1, Position::Forward, 18, 7),
        player(2, "Leo Garcia", 1, Position::Midfielder, 5, 12),
        player(5, "Alex Mueller", 2, Position::Forward, 14, 5),
    ];

    let forwards = PlayerQuery {
        position: Some(Position::Forward),
        ..PlayerQuery::default()
    };
    assert_eq!(forwards.apply(&players).len(), 2);

    let thunder_forwards = PlayerQuery {
        team_id: Some(1),
        ..forwards.clone()
    };
    let found = thunder_forwards.apply(&players);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].full_name, "Marcus Johnson");

    let by_name = PlayerQuery {
        search: Some("GARC".to_string()),
        ..PlayerQuery::default()
    };
    assert_eq!(by_name.apply(&players)[0].id, 2);
    assert_eq!(PlayerQuery::default().apply(&players).len(), 3);
}
