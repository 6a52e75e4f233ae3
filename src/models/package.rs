use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Metric columns produced by the scoring pipeline. None means not scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageScores {
    pub license_score: Option<i64>,
    pub netscore: Option<i64>,
    pub dependency_pinning_score: Option<i64>,
    pub rampup_score: Option<i64>,
    pub review_percentage_score: Option<i64>,
    pub bus_factor: Option<i64>,
    pub correctness: Option<i64>,
    pub responsive_maintainer: Option<i64>,
}

/// Database package model
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Package {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub version: Option<String>,
    pub license_score: Option<i64>,
    pub netscore: Option<i64>,
    pub dependency_pinning_score: Option<i64>,
    pub rampup_score: Option<i64>,
    pub review_percentage_score: Option<i64>,
    pub bus_factor: Option<i64>,
    pub correctness: Option<i64>,
    pub responsive_maintainer: Option<i64>,
}

impl Package {
    pub fn scores(&self) -> PackageScores {
        PackageScores {
            license_score: self.license_score,
            netscore: self.netscore,
            dependency_pinning_score: self.dependency_pinning_score,
            rampup_score: self.rampup_score,
            review_percentage_score: self.review_percentage_score,
            bus_factor: self.bus_factor,
            correctness: self.correctness,
            responsive_maintainer: self.responsive_maintainer,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPackage {
    pub name: String,
    pub url: String,
    pub version: Option<String>,
    pub scores: PackageScores,
}

impl NewPackage {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            version: None,
            scores: PackageScores::default(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_scores(mut self, scores: PackageScores) -> Self {
        self.scores = scores;
        self
    }
}
