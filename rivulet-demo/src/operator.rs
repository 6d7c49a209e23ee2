// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fmt;
use std::str::FromStr;

/// Combination strategy selected for a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    ForkJoin,
    Zip,
    CombineLatest,
    Merge,
    Map,
    SwitchMap,
    Filter,
    TakeUntil,
    Subject,
    BehaviorSubject,
    ReplaySubject,
    Default,
}

/// The three hot subject variants owned by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotFlavor {
    Subject,
    Behavior,
    Replay,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operator `{0}`")]
pub struct UnknownOperator(pub String);

impl Operator {
    pub const ALL: [Operator; 12] = [
        Operator::ForkJoin,
        Operator::Zip,
        Operator::CombineLatest,
        Operator::Merge,
        Operator::Map,
        Operator::SwitchMap,
        Operator::Filter,
        Operator::TakeUntil,
        Operator::Subject,
        Operator::BehaviorSubject,
        Operator::ReplaySubject,
        Operator::Default,
    ];

    /// Numeric selection: 0 to 3 pick the four pairwise combinations, anything else
    /// is [`Operator::Default`].
    #[must_use]
    pub const fn from_index(index: i64) -> Self {
        match index {
            0 => Operator::ForkJoin,
            1 => Operator::Zip,
            2 => Operator::CombineLatest,
            3 => Operator::Merge,
            _ => Operator::Default,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Operator::ForkJoin => "fork-join",
            Operator::Zip => "zip",
            Operator::CombineLatest => "combine-latest",
            Operator::Merge => "merge",
            Operator::Map => "map",
            Operator::SwitchMap => "switch-map",
            Operator::Filter => "filter",
            Operator::TakeUntil => "take-until",
            Operator::Subject => "subject",
            Operator::BehaviorSubject => "behavior-subject",
            Operator::ReplaySubject => "replay-subject",
            Operator::Default => "default",
        }
    }

    #[must_use]
    pub const fn hot_flavor(self) -> Option<HotFlavor> {
        match self {
            Operator::Subject => Some(HotFlavor::Subject),
            Operator::BehaviorSubject => Some(HotFlavor::Behavior),
            Operator::ReplaySubject => Some(HotFlavor::Replay),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = UnknownOperator;

    /// Accepts kebab-, snake- or camel-case, ignoring case.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        Operator::ALL
            .into_iter()
            .find(|operator| operator.as_str().replace('-', "") == normalized)
            .ok_or_else(|| UnknownOperator(raw.to_string()))
    }
}

impl HotFlavor {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            HotFlavor::Subject => "subject",
            HotFlavor::Behavior => "behavior-subject",
            HotFlavor::Replay => "replay-subject",
        }
    }
}

impl fmt::Display for HotFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
