//! # Video Module
//!
//! The production-tracking record the aspect fields describe.
//!
//! The record is owned by the storage layer; this crate only reads it.
//! Attributes are addressed by property path: a PascalCase attribute name,
//! optionally prefixed by the nested group and [`PATH_SEPARATOR`]
//! (for example `Sponsorship.Amount`).

use crate::Value;
use serde::{Deserialize, Serialize};

/// Separator between a nested group and its attribute in a property path.
pub const PATH_SEPARATOR: char = '.';

/// Sponsorship amount values that mean "no sponsor".
const NO_SPONSOR_MARKERS: [&str; 2] = ["N/A", "-"];

/// Sponsorship details attached to a video.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Sponsorship {
    /// Sponsorship amount, free-form ("1000", "N/A", "-", or blank).
    pub amount: String,
    /// Sponsor contact emails.
    pub emails: String,
    /// Reason the sponsorship is blocked, blank when it is not.
    pub blocked: String,
}

impl Sponsorship {
    /// Whether the video has a sponsor.
    ///
    /// A blank amount, `N/A` or `-` all mean there is no sponsorship.
    #[must_use]
    pub fn is_sponsored(&self) -> bool {
        let amount = self.amount.trim();
        !amount.is_empty() && !NO_SPONSOR_MARKERS.contains(&amount)
    }

    fn resolve(&self, attribute: &str) -> Option<Value> {
        let value = match attribute {
            "Amount" => &self.amount,
            "Emails" => &self.emails,
            "Blocked" => &self.blocked,
            _ => return None,
        };
        Some(Value::text(value.as_str()))
    }
}

/// A video moving through the production phases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Video {
    // Identity
    pub name: String,
    pub index: i64,
    pub path: String,
    pub category: String,

    // Initial details
    pub project_name: String,
    #[serde(rename = "projectURL")]
    pub project_url: String,
    pub sponsorship: Sponsorship,
    pub date: String,
    pub delayed: bool,
    pub gist: String,

    // Work progress
    pub code: bool,
    pub head: bool,
    pub screen: bool,
    pub related_videos: String,
    pub thumbnails: bool,
    pub diagrams: bool,
    pub screenshots: bool,
    pub location: String,
    pub tagline: String,
    pub tagline_ideas: String,
    pub other_logos: String,

    // Definition
    pub title: String,
    pub description: String,
    pub highlight: String,
    pub tags: String,
    pub description_tags: String,
    pub tweet: String,
    pub animations: String,
    pub request_thumbnail: bool,
    pub language: String,

    // Post-production
    pub thumbnail: String,
    pub members: String,
    pub request_edit: bool,
    pub timecodes: String,
    pub movie: bool,
    pub slides: bool,

    // Publishing
    pub upload_video: String,
    pub video_id: String,
    pub hugo_path: String,

    // Post-publish
    #[serde(rename = "dotPosted")]
    pub dot_posted: bool,
    pub blue_sky_posted: bool,
    pub linked_in_posted: bool,
    pub slack_posted: bool,
    #[serde(rename = "hnPosted")]
    pub hn_posted: bool,
    #[serde(rename = "youTubeHighlight")]
    pub youtube_highlight: bool,
    #[serde(rename = "youTubeComment")]
    pub youtube_comment: bool,
    #[serde(rename = "youTubeCommentReply")]
    pub youtube_comment_reply: bool,
    pub gde: bool,
    pub repo: String,
    pub notified_sponsors: bool,
}

impl Video {
    /// Create an empty record with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Read the value at `path`.
    ///
    /// Supports one level of nesting (`Sponsorship.Amount`). Returns `None`
    /// for unknown paths, for a bare group name, and for deeper nesting.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<Value> {
        if let Some((group, attribute)) = path.split_once(PATH_SEPARATOR) {
            return match group {
                "Sponsorship" => self.sponsorship.resolve(attribute),
                _ => None,
            };
        }

        let value = match path {
            "Name" => Value::text(self.name.as_str()),
            "Index" => Value::Integer(self.index),
            "Path" => Value::text(self.path.as_str()),
            "Category" => Value::text(self.category.as_str()),
            "ProjectName" => Value::text(self.project_name.as_str()),
            "ProjectURL" => Value::text(self.project_url.as_str()),
            "Date" => Value::text(self.date.as_str()),
            "Delayed" => Value::Bool(self.delayed),
            "Gist" => Value::text(self.gist.as_str()),
            "Code" => Value::Bool(self.code),
            "Head" => Value::Bool(self.head),
            "Screen" => Value::Bool(self.screen),
            "RelatedVideos" => Value::text(self.related_videos.as_str()),
            "Thumbnails" => Value::Bool(self.thumbnails),
            "Diagrams" => Value::Bool(self.diagrams),
            "Screenshots" => Value::Bool(self.screenshots),
            "Location" => Value::text(self.location.as_str()),
            "Tagline" => Value::text(self.tagline.as_str()),
            "TaglineIdeas" => Value::text(self.tagline_ideas.as_str()),
            "OtherLogos" => Value::text(self.other_logos.as_str()),
            "Title" => Value::text(self.title.as_str()),
            "Description" => Value::text(self.description.as_str()),
            "Highlight" => Value::text(self.highlight.as_str()),
            "Tags" => Value::text(self.tags.as_str()),
            "DescriptionTags" => Value::text(self.description_tags.as_str()),
            "Tweet" => Value::text(self.tweet.as_str()),
            "Animations" => Value::text(self.animations.as_str()),
            "RequestThumbnail" => Value::Bool(self.request_thumbnail),
            "Language" => Value::text(self.language.as_str()),
            "Thumbnail" => Value::text(self.thumbnail.as_str()),
            "Members" => Value::text(self.members.as_str()),
            "RequestEdit" => Value::Bool(self.request_edit),
            "Timecodes" => Value::text(self.timecodes.as_str()),
            "Movie" => Value::Bool(self.movie),
            "Slides" => Value::Bool(self.slides),
            "UploadVideo" => Value::text(self.upload_video.as_str()),
            "VideoId" => Value::text(self.video_id.as_str()),
            "HugoPath" => Value::text(self.hugo_path.as_str()),
            "DOTPosted" => Value::Bool(self.dot_posted),
            "BlueSkyPosted" => Value::Bool(self.blue_sky_posted),
            "LinkedInPosted" => Value::Bool(self.linked_in_posted),
            "SlackPosted" => Value::Bool(self.slack_posted),
            "HNPosted" => Value::Bool(self.hn_posted),
            "YouTubeHighlight" => Value::Bool(self.youtube_highlight),
            "YouTubeComment" => Value::Bool(self.youtube_comment),
            "YouTubeCommentReply" => Value::Bool(self.youtube_comment_reply),
            "GDE" => Value::Bool(self.gde),
            "Repo" => Value::text(self.repo.as_str()),
            "NotifiedSponsors" => Value::Bool(self.notified_sponsors),
            _ => return None,
        };
        Some(value)
    }

    /// Like [`Video::resolve`], with `Value::Null` for unknown paths.
    #[must_use]
    pub fn value_at(&self, path: &str) -> Value {
        self.resolve(path).unwrap_or_default()
    }
}

// =============================================================================
// TESTS
// =============================================================================
