use std::time::{Duration, Instant};

use online_test_admin::domain::qanda::{QANDA_COLUMNS, QandA};
use online_test_admin::domain::types::{QueryId, TopicId, YesNo};
use online_test_admin::table::{
    PageSummary, PaginationState, ServerPageInfo, SortOrder, TableAction, TableConfig,
    TableController, TableMode, compute_local_page, reduce,
};

fn question(id: usize, query: &str, marks: i64) -> QandA {
    QandA {
        query_id: QueryId::new(format!("q{id}")).unwrap(),
        topic_id: TopicId::new("t1").unwrap(),
        query: query.to_string(),
        query_type: if id % 2 == 0 { "MCQ" } else { "TEXT" }.to_string(),
        marks_per_query: marks,
        minus_marks_perc: 0,
        active: YesNo::Yes,
        multi_choice: YesNo::No,
        lookup_values: String::new(),
    }
}

fn dataset(len: usize) -> Vec<QandA> {
    (1..=len)
        .map(|i| question(i, &format!("Question number {i} about ownership"), (i % 7) as i64 + 1))
        .collect()
}

#[test]
fn limit_search_and_sort_changes_return_to_first_page() {
    let state = PaginationState {
        page: 4,
        ..PaginationState::default()
    };
    let actions = [
        TableAction::SetLimit(50),
        TableAction::SetSearch("borrow".into()),
        TableAction::ToggleSort {
            column: "QUERY".into(),
        },
        TableAction::ClearSort,
    ];

    for action in actions {
        assert_eq!(reduce(&state, &action, 10).page, 1, "{action:?}");
    }
}

#[test]
fn toggling_the_same_column_twice_restores_the_order() {
    let start = PaginationState {
        sort_by: Some("QUERY".into()),
        sort_order: SortOrder::Desc,
        ..PaginationState::default()
    };
    let toggle = TableAction::ToggleSort {
        column: "QUERY".into(),
    };

    let once = reduce(&start, &toggle, 1);
    let twice = reduce(&once, &toggle, 1);

    assert_eq!(once.sort_order, SortOrder::Asc);
    assert_eq!(twice.sort_order, start.sort_order);
    assert_eq!(twice.sort_by, start.sort_by);
}

#[test]
fn local_search_only_narrows_the_dataset() {
    let mut rows = dataset(30);
    rows.push(question(99, "What does the borrow checker enforce?", 5));

    let state = PaginationState {
        search: "BORROW".into(),
        limit: 100,
        ..PaginationState::default()
    };
    let page = compute_local_page(&rows, &QANDA_COLUMNS, &state);

    assert_eq!(page.filtered_count, 1);
    assert!(page.rows.iter().all(|row| rows.iter().any(|r| r == *row)));
    assert_eq!(page.rows[0].query_id.as_str(), "q99");
}

/// Walks every local page and checks no row is skipped or repeated.
#[test]
fn local_pages_cover_every_row_exactly_once() {
    let rows = dataset(23);
    let mut seen = Vec::new();
    for page in 1..=3 {
        let state = PaginationState {
            page,
            limit: 10,
            sort_by: Some("MARKS_PER_QUERY".into()),
            ..PaginationState::default()
        };
        let local = compute_local_page(&rows, &QANDA_COLUMNS, &state);
        assert_eq!(local.total_pages, 3);
        seen.extend(local.rows.iter().map(|row| row.query_id.to_string()));
    }

    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 23);
}

#[test]
fn server_mode_renders_the_fetched_page_in_server_order() {
    let rows = vec![question(2, "Zeta question text", 1), question(1, "Alpha question text", 9)];
    let mut controller = TableController::new(
        TableConfig::new(TableMode::Server, &QANDA_COLUMNS).initial_state(PaginationState {
            sort_by: Some("QUERY".into()),
            ..PaginationState::default()
        }),
    )
    .with_server_page(ServerPageInfo {
        current_page: 1,
        total_pages: 1,
        total_count: 2,
    });

    let visible = controller.visible_rows(&rows);
    let ids: Vec<_> = visible.rows.iter().map(|row| row.query_id.as_str()).collect();
    assert_eq!(ids, vec!["q2", "q1"]);
}

/// Simulates a typing session against a server-mode table.
#[test]
fn server_search_is_debounced_and_stale_responses_are_dropped() {
    let mut controller = TableController::new(TableConfig::new(TableMode::Server, &QANDA_COLUMNS))
        .with_server_page(ServerPageInfo {
            current_page: 1,
            total_pages: 5,
            total_count: 50,
        });
    let start = Instant::now();

    assert!(controller.dispatch(TableAction::SetSearch("own".into()), start).is_none());
    assert!(controller.dispatch(TableAction::SetSearch("owner".into()), start).is_none());
    assert!(controller.poll(start + Duration::from_millis(100)).is_none());

    let first = controller
        .poll(start + Duration::from_secs(1))
        .expect("debounced search commits");
    assert_eq!(first.state.search, "owner");
    assert_eq!(first.state.page, 1);

    let second = controller
        .dispatch(TableAction::NextPage, start + Duration::from_secs(2))
        .expect("page change refetches");
    assert!(second.sequence > first.sequence);

    let info = ServerPageInfo {
        current_page: 1,
        total_pages: 1,
        total_count: 3,
    };
    assert!(!controller.accept_response(first.sequence, info));
    assert!(controller.accept_response(second.sequence, info));
}

#[test]
fn summary_bounds_hold_for_any_page() {
    for total in [0usize, 1, 9, 10, 11, 95] {
        for limit in [1usize, 10, 25] {
            for page in 1..=12 {
                let summary = PageSummary::new(page, limit, total);
                assert!(summary.from <= summary.to, "{page}/{limit}/{total}");
                assert!(summary.to <= summary.total);
                assert_eq!(summary.total, total);
            }
        }
    }
    assert_eq!(
        PageSummary::new(1, 10, 0).to_string(),
        "Showing 0 to 0 of 0 results"
    );
}
