// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod common;

use common::{harness, harness_with, leanne_with_posts, ScriptedFetcher};
use futures::{FutureExt, StreamExt};
use rivulet_core::StreamItem;
use rivulet_demo::{
    DispatchOutcome, DispatchSettings, DisplayPost, FailureKind, Operator, Post,
};
use rivulet_test_utils::fixtures::{all_posts, posts_a_b, posts_with_blank_title, scalar_payload, user_leanne};
use std::sync::Arc;
use std::time::Duration;

fn row(id: u64, title: &str, author: Option<&str>) -> DisplayPost {
    DisplayPost {
        id,
        title: title.to_string(),
        author: author.map(str::to_string),
        body: "body".to_string(),
    }
}

fn leanne_rows() -> Vec<DisplayPost> {
    vec![row(0, "A", Some("Leanne")), row(1, "B", Some("Leanne"))]
}

#[tokio::test]
async fn fork_join_builds_rows_for_every_post() {
    // Arrange
    let h = harness(leanne_with_posts(posts_a_b()));

    // Act
    let outcome = h.dispatcher.dispatch(Operator::ForkJoin).await;

    // Assert
    assert_eq!(outcome, DispatchOutcome::Completed { commits: 1 });
    assert_eq!(h.dispatcher.board().rows(), leanne_rows());
}

#[tokio::test]
async fn zip_and_combine_latest_match_fork_join_for_single_shot_sources() {
    for operator in [Operator::Zip, Operator::CombineLatest] {
        // Arrange
        let h = harness(leanne_with_posts(posts_a_b()));

        // Act
        let outcome = h.dispatcher.dispatch(operator).await;

        // Assert
        assert_eq!(outcome, DispatchOutcome::Completed { commits: 1 }, "{operator}");
        assert_eq!(h.dispatcher.board().rows(), leanne_rows(), "{operator}");
    }
}

#[tokio::test]
async fn merge_converges_when_user_arrives_first() {
    // Arrange
    let (fetcher, posts_gate) = ScriptedFetcher::new()
        .json("/users/1", user_leanne())
        .gated_json("/posts?userId=1", posts_a_b());
    let h = harness(fetcher);
    let mut commits = h.dispatcher.board().subscribe().unwrap();

    // Act
    let (outcome, ()) = tokio::join!(h.dispatcher.dispatch(Operator::Merge), async {
        tokio::time::sleep(Duration::from_millis(30)).await;
        posts_gate.notify_one();
    });

    // Assert
    assert_eq!(outcome, DispatchOutcome::Completed { commits: 2 });
    assert_eq!(commits.next().await, Some(StreamItem::Value(vec![])));
    assert_eq!(commits.next().await, Some(StreamItem::Value(vec![])));
    assert_eq!(commits.next().await, Some(StreamItem::Value(leanne_rows())));
}

#[tokio::test]
async fn merge_converges_when_posts_arrive_first() {
    // Arrange
    let (fetcher, user_gate) = ScriptedFetcher::new()
        .json("/posts?userId=1", posts_a_b())
        .gated_json("/users/1", user_leanne());
    let h = harness(fetcher);
    let mut commits = h.dispatcher.board().subscribe().unwrap();

    // Act
    let (outcome, ()) = tokio::join!(h.dispatcher.dispatch(Operator::Merge), async {
        tokio::time::sleep(Duration::from_millis(30)).await;
        user_gate.notify_one();
    });

    // Assert
    assert_eq!(outcome, DispatchOutcome::Completed { commits: 2 });
    assert_eq!(commits.next().await, Some(StreamItem::Value(vec![])));
    assert_eq!(
        commits.next().await,
        Some(StreamItem::Value(vec![row(0, "A", None), row(1, "B", None)]))
    );
    assert_eq!(commits.next().await, Some(StreamItem::Value(leanne_rows())));
}

#[tokio::test]
async fn merge_rejects_payloads_that_are_neither_object_nor_array() {
    // Arrange
    let fetcher = ScriptedFetcher::new()
        .json("/users/1", scalar_payload())
        .json("/posts?userId=1", posts_a_b());
    let h = harness(fetcher);

    // Act
    let outcome = h.dispatcher.dispatch(Operator::Merge).await;

    // Assert
    assert!(matches!(
        outcome,
        DispatchOutcome::Failed {
            kind: FailureKind::Mapping,
            ..
        }
    ));
}

#[tokio::test]
async fn map_uses_posts_only() {
    // Arrange
    let h = harness(leanne_with_posts(posts_a_b()));

    // Act
    let outcome = h.dispatcher.dispatch(Operator::Map).await;

    // Assert
    assert_eq!(outcome, DispatchOutcome::Completed { commits: 1 });
    assert_eq!(
        h.dispatcher.board().rows(),
        vec![row(0, "A", None), row(1, "B", None)]
    );
    assert_eq!(h.fetcher.requests(), vec!["/posts?userId=1".to_string()]);
}

#[tokio::test]
async fn switch_map_looks_up_posts_of_the_fetched_user() {
    // Arrange
    let h = harness(leanne_with_posts(posts_a_b()));

    // Act
    let outcome = h.dispatcher.dispatch(Operator::SwitchMap).await;

    // Assert
    assert_eq!(outcome, DispatchOutcome::Completed { commits: 1 });
    assert_eq!(h.dispatcher.board().rows(), leanne_rows());
    assert_eq!(
        h.fetcher.requests(),
        vec!["/users/1".to_string(), "/posts?userId=1".to_string()]
    );
}

#[tokio::test]
async fn filter_drops_blank_titles_and_reindexes() {
    // Arrange
    let h = harness(leanne_with_posts(posts_with_blank_title()));

    // Act
    let outcome = h.dispatcher.dispatch(Operator::Filter).await;

    // Assert
    assert_eq!(outcome, DispatchOutcome::Completed { commits: 1 });
    assert_eq!(
        h.dispatcher.board().rows(),
        vec![row(0, "A", Some("Leanne")), row(1, "C", Some("Leanne"))]
    );
}

#[tokio::test]
async fn filter_uses_the_configured_predicate() {
    // Arrange
    let settings = DispatchSettings::default().with_post_filter(Arc::new(|post: &Post| post.id == 2));
    let h = harness_with(leanne_with_posts(posts_a_b()), settings);

    // Act
    h.dispatcher.dispatch(Operator::Filter).await;

    // Assert
    assert_eq!(h.dispatcher.board().rows(), vec![row(0, "B", Some("Leanne"))]);
}

#[tokio::test]
async fn take_until_forwards_before_the_window_closes() {
    // Arrange
    let h = harness(leanne_with_posts(posts_a_b()));

    // Act
    let outcome = h.dispatcher.dispatch(Operator::TakeUntil).await;

    // Assert
    assert_eq!(outcome, DispatchOutcome::Completed { commits: 1 });
    assert_eq!(h.dispatcher.board().rows(), leanne_rows());
}

#[tokio::test]
async fn take_until_drops_emissions_after_the_window() {
    // Arrange
    let (fetcher, posts_gate) = ScriptedFetcher::new()
        .json("/users/1", user_leanne())
        .gated_json("/posts?userId=1", posts_a_b());
    let settings = DispatchSettings {
        take_until_window: Duration::from_millis(30),
        ..DispatchSettings::default()
    };
    let h = harness_with(fetcher, settings);

    // Act
    let outcome = h.dispatcher.dispatch(Operator::TakeUntil).await;
    posts_gate.notify_one();

    // Assert
    assert_eq!(outcome, DispatchOutcome::Completed { commits: 0 });
    assert!(h.dispatcher.board().rows().is_empty());
}

#[tokio::test]
async fn default_operator_is_a_no_op() {
    // Arrange
    let h = harness(leanne_with_posts(posts_a_b()));

    // Act
    let outcome = h.dispatcher.dispatch(Operator::Default).await;

    // Assert
    assert_eq!(outcome, DispatchOutcome::NoOp);
    assert_eq!(h.indicator.shown(), 0);
    assert!(h.fetcher.requests().is_empty());
}

#[tokio::test]
async fn network_failure_is_swallowed_and_commits_nothing() {
    // Arrange
    let fetcher = ScriptedFetcher::new()
        .json("/users/1", user_leanne())
        .status("/posts?userId=1", 503);
    let h = harness(fetcher);

    // Act
    let outcome = h.dispatcher.dispatch(Operator::ForkJoin).await;

    // Assert
    assert!(matches!(
        outcome,
        DispatchOutcome::Failed {
            kind: FailureKind::Network,
            ..
        }
    ));
    assert!(h.dispatcher.board().rows().is_empty());
    assert_eq!(h.indicator.shown(), 1);
    assert_eq!(h.indicator.dismissed(), 1);
}

#[tokio::test]
async fn wrong_shape_is_a_mapping_failure() {
    // Arrange
    let fetcher = ScriptedFetcher::new()
        .json("/users/1", posts_a_b())
        .json("/posts?userId=1", posts_a_b());
    let h = harness(fetcher);

    // Act
    let outcome = h.dispatcher.dispatch(Operator::ForkJoin).await;

    // Assert
    assert!(matches!(
        outcome,
        DispatchOutcome::Failed {
            kind: FailureKind::Mapping,
            ..
        }
    ));
}

#[tokio::test]
async fn teardown_mid_dispatch_cancels_and_releases_the_indicator() {
    // Arrange
    let (fetcher, _posts_gate) = ScriptedFetcher::new()
        .json("/users/1", user_leanne())
        .gated_json("/posts?userId=1", posts_a_b());
    let h = harness(fetcher);

    // Act
    let (outcome, ()) = tokio::join!(h.dispatcher.dispatch(Operator::ForkJoin), async {
        tokio::time::sleep(Duration::from_millis(30)).await;
        h.dispatcher.teardown();
    });

    // Assert
    assert_eq!(outcome, DispatchOutcome::Cancelled);
    assert_eq!(h.indicator.dismissed(), 1);
    assert!(h.dispatcher.board().is_closed());
}

#[tokio::test]
async fn dispatch_after_teardown_is_lifecycle_misuse() {
    // Arrange
    let h = harness(leanne_with_posts(posts_a_b()));
    h.dispatcher.teardown();

    // Act
    let outcome = h.dispatcher.dispatch(Operator::ForkJoin).await;

    // Assert
    assert!(matches!(
        outcome,
        DispatchOutcome::Failed {
            kind: FailureKind::Lifecycle,
            ..
        }
    ));
    assert!(h.fetcher.requests().is_empty());
    assert!(h.dispatcher.board().subscribe().is_err());
}

#[tokio::test]
async fn initial_load_commits_posts_verbatim() {
    // Arrange
    let fetcher = ScriptedFetcher::new().json("/posts", all_posts());
    let h = harness(fetcher);

    // Act
    let outcome = h.dispatcher.load_initial().await;

    // Assert
    assert_eq!(outcome, DispatchOutcome::Completed { commits: 1 });
    let rows = h.dispatcher.board().rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].id, 3);
    assert_eq!(rows[2].body, "z");
    assert!(rows.iter().all(|row| row.author.is_none()));
}

#[tokio::test]
async fn failed_dispatch_leaves_previous_rows_in_place() {
    // Arrange
    let fetcher = ScriptedFetcher::new()
        .json("/posts", all_posts())
        .json("/users/1", user_leanne())
        .status("/posts?userId=1", 500);
    let h = harness(fetcher);
    h.dispatcher.load_initial().await;
    let before = h.dispatcher.board().rows();
    let mut observer = h.dispatcher.board().subscribe().unwrap();
    assert_eq!(observer.next().await, Some(StreamItem::Value(before.clone())));

    // Act
    let outcome = h.dispatcher.dispatch(Operator::Zip).await;

    // Assert
    assert!(matches!(outcome, DispatchOutcome::Failed { .. }));
    assert_eq!(h.dispatcher.board().rows(), before);
    assert!(observer.next().now_or_never().is_none());
}
