//! Per-video sentiment aggregation
//!
//! Fetches a video's comments, classifies each one with either the lexicon
//! scorer or the trained classifier, and turns the tallies into a
//! percentage distribution with an overall verdict.

use super::{PolarityScorer, Sentiment, SentimentCounts, SentimentDistribution, TrainedClassifierBundle};
use crate::error::Result;
use crate::youtube::{CommentSource, Video};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Sentiment summary of one video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub video: Video,
    pub sentiments: SentimentDistribution,
    pub overall: Sentiment,
    pub message: String,
}

impl AnalysisResult {
    /// Build the summary from category counts
    pub fn from_counts(video: Video, counts: &SentimentCounts) -> Self {
        let sentiments = SentimentDistribution::from_counts(counts);
        let overall = sentiments.overall();

        Self {
            video,
            sentiments,
            overall,
            message: overall.message().to_string(),
        }
    }
}

/// Tally comments with the lexicon scorer (three categories)
pub fn tally_lexicon<S: AsRef<str>>(scorer: &dyn PolarityScorer, comments: &[S]) -> SentimentCounts {
    comments
        .iter()
        .map(|comment| scorer.classify(comment.as_ref()))
        .collect()
}

/// Tally comments with the trained classifier (positive / negative only)
pub fn tally_statistical<S: AsRef<str>>(
    classifier: &TrainedClassifierBundle,
    comments: &[S],
) -> SentimentCounts {
    classifier.classify(comments).into_iter().collect()
}

/// Runs a scorer over every comment of a video
pub struct SentimentAggregator {
    comments: Arc<dyn CommentSource>,
    lexicon: Arc<dyn PolarityScorer>,
    classifier: Option<Arc<TrainedClassifierBundle>>,
}

impl SentimentAggregator {
    pub fn new(
        comments: Arc<dyn CommentSource>,
        lexicon: Arc<dyn PolarityScorer>,
        classifier: Option<Arc<TrainedClassifierBundle>>,
    ) -> Self {
        Self {
            comments,
            lexicon,
            classifier,
        }
    }

    /// True when statistical mode is backed by a trained model
    pub fn has_classifier(&self) -> bool {
        self.classifier.is_some()
    }

    /// Fetch comments for `video` and summarize their sentiment.
    ///
    /// Statistical mode without a loaded classifier silently uses the lexicon.
    pub async fn analyze_video(&self, video: Video, use_statistical: bool) -> Result<AnalysisResult> {
        let comments = self.comments.fetch_comments(&video.video_id).await?;
        Ok(self.analyze_comments(video, &comments, use_statistical))
    }

    /// Summarize already fetched comments
    pub fn analyze_comments<S: AsRef<str>>(
        &self,
        video: Video,
        comments: &[S],
        use_statistical: bool,
    ) -> AnalysisResult {
        let counts = match (&self.classifier, use_statistical) {
            (Some(classifier), true) => tally_statistical(classifier, comments),
            _ => tally_lexicon(self.lexicon.as_ref(), comments),
        };

        let result = AnalysisResult::from_counts(video, &counts);
        tracing::debug!(
            "Video {}: {} comments, {:.2}% positive / {:.2}% neutral / {:.2}% negative -> {}",
            result.video.video_id,
            comments.len(),
            result.sentiments.positive,
            result.sentiments.neutral,
            result.sentiments.negative,
            result.overall
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::{Label, LexiconAnalyzer};
    use crate::youtube::MockCommentSource;
    use mockall::predicate::eq;

    /// Scorer returning a fixed compound score per exact text
    struct FixedScorer(Vec<(&'static str, f64)>);

    impl PolarityScorer for FixedScorer {
        fn compound(&self, text: &str) -> f64 {
            self.0
                .iter()
                .find(|(t, _)| *t == text)
                .map(|(_, s)| *s)
                .unwrap_or(0.0)
        }
    }

    fn trained_bundle() -> Arc<TrainedClassifierBundle> {
        let comments = [
            "great video loved it",
            "awesome helpful tutorial",
            "terrible waste of time",
            "boring useless video",
        ];
        let labels = [Label::Positive, Label::Positive, Label::Negative, Label::Negative];
        Arc::new(TrainedClassifierBundle::train(&comments, &labels).unwrap())
    }

    fn source_with(comments: Vec<&'static str>) -> Arc<MockCommentSource> {
        let mut source = MockCommentSource::new();
        source
            .expect_fetch_comments()
            .returning(move |_| Ok(comments.iter().map(|c| c.to_string()).collect()));
        Arc::new(source)
    }

    fn video() -> Video {
        Video::new("vid1", "Title", "Description")
    }

    #[test]
    fn test_lexicon_thresholds_through_aggregator() {
        let scorer = FixedScorer(vec![("a", 0.05), ("b", -0.05), ("c", 0.0), ("d", 0.04999)]);
        let counts = tally_lexicon(&scorer, &["a", "b", "c", "d"]);
        assert_eq!(
            counts,
            SentimentCounts {
                positive: 1,
                neutral: 2,
                negative: 1
            }
        );
    }

    #[test]
    fn test_lexicon_mode_three_categories() {
        let aggregator = SentimentAggregator::new(
            source_with(vec![]),
            Arc::new(LexiconAnalyzer::new()),
            None,
        );
        let result = aggregator.analyze_comments(
            video(),
            &["I love this!", "Terrible.", "The video is 10 minutes long.", "Great stuff"],
            false,
        );

        assert_eq!(result.sentiments.positive, 50.0);
        assert_eq!(result.sentiments.neutral, 25.0);
        assert_eq!(result.sentiments.negative, 25.0);
        assert_eq!(result.overall, Sentiment::Positive);
        assert_eq!(result.message, "Best video! Go ahead 😊");
    }

    #[test]
    fn test_statistical_mode_never_neutral() {
        let aggregator = SentimentAggregator::new(
            source_with(vec![]),
            Arc::new(LexiconAnalyzer::new()),
            Some(trained_bundle()),
        );
        let comments = [
            "The video is 10 minutes long.",
            "",
            "great tutorial",
            "boring waste",
            "posted on tuesday",
        ];
        let result = aggregator.analyze_comments(video(), &comments, true);

        assert_eq!(result.sentiments.neutral, 0.0);
        assert!((result.sentiments.sum() - 100.0).abs() < 0.02);
    }

    #[test]
    fn test_statistical_without_model_matches_lexicon() {
        let aggregator = SentimentAggregator::new(
            source_with(vec![]),
            Arc::new(LexiconAnalyzer::new()),
            None,
        );
        assert!(!aggregator.has_classifier());

        let comments = ["I love this!", "Terrible.", "ok then", "meh", "not bad"];
        let statistical = aggregator.analyze_comments(video(), &comments, true);
        let lexicon = aggregator.analyze_comments(video(), &comments, false);
        assert_eq!(statistical, lexicon);
    }

    #[test]
    fn test_lexicon_mode_ignores_loaded_model() {
        let with_model = SentimentAggregator::new(
            source_with(vec![]),
            Arc::new(LexiconAnalyzer::new()),
            Some(trained_bundle()),
        );
        let without_model = SentimentAggregator::new(
            source_with(vec![]),
            Arc::new(LexiconAnalyzer::new()),
            None,
        );
        let comments = ["The video is 10 minutes long.", "Great stuff"];
        assert_eq!(
            with_model.analyze_comments(video(), &comments, false),
            without_model.analyze_comments(video(), &comments, false)
        );
    }

    #[test]
    fn test_no_comments_degenerate_result() {
        let aggregator = SentimentAggregator::new(
            source_with(vec![]),
            Arc::new(LexiconAnalyzer::new()),
            None,
        );
        let empty: [&str; 0] = [];
        let result = aggregator.analyze_comments(video(), &empty, false);

        assert_eq!(result.sentiments, SentimentDistribution::default());
        assert_eq!(result.overall, Sentiment::Positive);
        assert_eq!(result.message, "Best video! Go ahead 😊");
    }

    #[test]
    fn test_negative_verdict_message() {
        let aggregator = SentimentAggregator::new(
            source_with(vec![]),
            Arc::new(LexiconAnalyzer::new()),
            None,
        );
        let result = aggregator.analyze_comments(video(), &["Terrible.", "worst video"], false);
        assert_eq!(result.overall, Sentiment::Negative);
        assert_eq!(result.message, "You are wasting your time 😞");
    }

    #[test]
    fn test_neutral_verdict_message() {
        let aggregator = SentimentAggregator::new(
            source_with(vec![]),
            Arc::new(LexiconAnalyzer::new()),
            None,
        );
        let result = aggregator.analyze_comments(video(), &["first", "posted on tuesday"], false);
        assert_eq!(result.overall, Sentiment::Neutral);
        assert_eq!(result.message, "It's okay. Might be worth a look 😐");
    }

    #[tokio::test]
    async fn test_analyze_video_fetches_by_id() {
        let mut source = MockCommentSource::new();
        source
            .expect_fetch_comments()
            .with(eq("vid1"))
            .times(1)
            .returning(|_| Ok(vec!["I love this!".to_string(), "Terrible.".to_string()]));

        let aggregator = SentimentAggregator::new(
            Arc::new(source),
            Arc::new(LexiconAnalyzer::new()),
            None,
        );
        let result = aggregator.analyze_video(video(), false).await.unwrap();

        assert_eq!(result.video.video_id, "vid1");
        assert_eq!(result.sentiments.positive, 50.0);
        assert_eq!(result.sentiments.negative, 50.0);
        assert_eq!(result.overall, Sentiment::Positive);
    }

    #[tokio::test]
    async fn test_analyze_video_propagates_provider_error() {
        use crate::error::{AppError, ProviderErrorKind};

        let mut source = MockCommentSource::new();
        source.expect_fetch_comments().returning(|_| {
            Err(AppError::Provider {
                kind: ProviderErrorKind::CommentsDisabled,
                status: 403,
                message: "disabled".to_string(),
            })
        });

        let aggregator = SentimentAggregator::new(
            Arc::new(source),
            Arc::new(LexiconAnalyzer::new()),
            None,
        );
        let err = aggregator.analyze_video(video(), false).await.unwrap_err();
        assert_eq!(err.provider_kind(), Some(ProviderErrorKind::CommentsDisabled));
    }

    #[test]
    fn test_result_json_shape() {
        let counts = SentimentCounts {
            positive: 1,
            neutral: 0,
            negative: 1,
        };
        let result = AnalysisResult::from_counts(video(), &counts);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["video"]["video_id"], "vid1");
        assert_eq!(json["sentiments"]["positive"], 50.0);
        assert_eq!(json["sentiments"]["neutral"], 0.0);
        assert_eq!(json["overall"], "positive");
        assert_eq!(json["message"], "Best video! Go ahead 😊");
    }
}
