//! Query parameter types shared by the endpoint services.
//!
//! Enum-valued parameters (aspect, referrer type, metric) are closed sets:
//! a value that is not in the set cannot be constructed, and `FromStr`
//! rejects unknown strings before any request is built. Date pairs must be
//! given together or not at all.

use crate::Error;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn fmt_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn push_opt(query: &mut Vec<(String, String)>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        if !value.is_empty() {
            query.push((key.to_owned(), value.to_owned()));
        }
    }
}

/// The dimension analytics are grouped by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aspect {
    Posts,
    Authors,
    Sections,
    Topics,
    Tags,
}

impl Aspect {
    pub const ALL: [Aspect; 5] = [
        Aspect::Posts,
        Aspect::Authors,
        Aspect::Sections,
        Aspect::Topics,
        Aspect::Tags,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Aspect::Posts => "posts",
            Aspect::Authors => "authors",
            Aspect::Sections => "sections",
            Aspect::Topics => "topics",
            Aspect::Tags => "tags",
        }
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aspect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|aspect| aspect.as_str() == s)
            .ok_or_else(|| Error::invalid_params(format!("invalid aspect `{s}`")))
    }
}

/// Singular aspect used by the `…/{meta}/{value}/detail` endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaAspect {
    Author,
    Section,
    Topic,
    Tag,
}

impl MetaAspect {
    pub const ALL: [MetaAspect; 4] = [
        MetaAspect::Author,
        MetaAspect::Section,
        MetaAspect::Topic,
        MetaAspect::Tag,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            MetaAspect::Author => "author",
            MetaAspect::Section => "section",
            MetaAspect::Topic => "topic",
            MetaAspect::Tag => "tag",
        }
    }
}

impl fmt::Display for MetaAspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetaAspect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|meta| meta.as_str() == s)
            .ok_or_else(|| Error::invalid_params(format!("invalid meta aspect `{s}`")))
    }
}

/// Traffic-source category for the referrer endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefType {
    Social,
    Search,
    Internal,
    Other,
}

impl RefType {
    pub const ALL: [RefType; 4] = [
        RefType::Social,
        RefType::Search,
        RefType::Internal,
        RefType::Other,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RefType::Social => "social",
            RefType::Search => "search",
            RefType::Internal => "internal",
            RefType::Other => "other",
        }
    }
}

impl fmt::Display for RefType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RefType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ref_type| ref_type.as_str() == s)
            .ok_or_else(|| Error::invalid_params(format!("invalid referrer type `{s}`")))
    }
}

/// Ranking metric accepted by the `sort` and `boost` parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    #[default]
    Views,
    MobileViews,
    TabletViews,
    DesktopViews,
    Visitors,
    VisitorsNew,
    VisitorsReturning,
    EngagedMinutes,
    AvgEngaged,
    AvgEngagedNew,
    AvgEngagedReturning,
    SocialInteractions,
    FbInteractions,
    TwInteractions,
    LiInteractions,
    PiInteractions,
    SocialReferrals,
    FbReferrals,
    TwReferrals,
    LiReferrals,
    PiReferrals,
}

impl Metric {
    pub const ALL: [Metric; 21] = [
        Metric::Views,
        Metric::MobileViews,
        Metric::TabletViews,
        Metric::DesktopViews,
        Metric::Visitors,
        Metric::VisitorsNew,
        Metric::VisitorsReturning,
        Metric::EngagedMinutes,
        Metric::AvgEngaged,
        Metric::AvgEngagedNew,
        Metric::AvgEngagedReturning,
        Metric::SocialInteractions,
        Metric::FbInteractions,
        Metric::TwInteractions,
        Metric::LiInteractions,
        Metric::PiInteractions,
        Metric::SocialReferrals,
        Metric::FbReferrals,
        Metric::TwReferrals,
        Metric::LiReferrals,
        Metric::PiReferrals,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Views => "views",
            Metric::MobileViews => "mobile_views",
            Metric::TabletViews => "tablet_views",
            Metric::DesktopViews => "desktop_views",
            Metric::Visitors => "visitors",
            Metric::VisitorsNew => "visitors_new",
            Metric::VisitorsReturning => "visitors_returning",
            Metric::EngagedMinutes => "engaged_minutes",
            Metric::AvgEngaged => "avg_engaged",
            Metric::AvgEngagedNew => "avg_engaged_new",
            Metric::AvgEngagedReturning => "avg_engaged_returning",
            Metric::SocialInteractions => "social_interactions",
            Metric::FbInteractions => "fb_interactions",
            Metric::TwInteractions => "tw_interactions",
            Metric::LiInteractions => "li_interactions",
            Metric::PiInteractions => "pi_interactions",
            Metric::SocialReferrals => "social_referrals",
            Metric::FbReferrals => "fb_referrals",
            Metric::TwReferrals => "tw_referrals",
            Metric::LiReferrals => "li_referrals",
            Metric::PiReferrals => "pi_referrals",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|metric| metric.as_str() == s)
            .ok_or_else(|| {
                let allowed = Self::ALL.map(|m| m.as_str()).join(", ");
                Error::invalid_params(format!("invalid metric `{s}` (allowed: {allowed})"))
            })
    }
}

/// Optional reporting-period and publish-date windows.
///
/// Each window must be given as a pair; a one-sided window is rejected
/// before any request is made.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateFilter {
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub pub_date_start: Option<NaiveDate>,
    pub pub_date_end: Option<NaiveDate>,
}

impl DateFilter {
    #[must_use]
    pub fn period(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            period_start: Some(start),
            period_end: Some(end),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn pub_dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            pub_date_start: Some(start),
            pub_date_end: Some(end),
            ..Self::default()
        }
    }

    pub(crate) fn append_to(&self, query: &mut Vec<(String, String)>) -> Result<(), Error> {
        append_date_pair(
            query,
            "period_start",
            "period_end",
            self.period_start,
            self.period_end,
        )?;
        append_date_pair(
            query,
            "pub_date_start",
            "pub_date_end",
            self.pub_date_start,
            self.pub_date_end,
        )
    }
}

fn append_date_pair(
    query: &mut Vec<(String, String)>,
    start_key: &str,
    end_key: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), Error> {
    match (start, end) {
        (Some(start), Some(end)) => {
            query.push((start_key.to_owned(), fmt_date(start)));
            query.push((end_key.to_owned(), fmt_date(end)));
            Ok(())
        }
        (None, None) => Ok(()),
        _ => Err(Error::invalid_params(format!(
            "{start_key} and {end_key} must be specified together"
        ))),
    }
}

/// Parameters for the `/analytics/*` listing endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyticsParams {
    /// Trailing window in days.
    pub days: u32,
    pub dates: DateFilter,
    pub sort: Metric,
    pub limit: u32,
    pub page: u32,
}

impl Default for AnalyticsParams {
    fn default() -> Self {
        Self {
            days: 14,
            dates: DateFilter::default(),
            sort: Metric::Views,
            limit: 10,
            page: 1,
        }
    }
}

impl AnalyticsParams {
    pub(crate) fn query_pairs(&self) -> Result<Vec<(String, String)>, Error> {
        let mut query = Vec::new();
        self.dates.append_to(&mut query)?;
        query.push(("sort".to_owned(), self.sort.as_str().to_owned()));
        query.push(("limit".to_owned(), self.limit.to_string()));
        query.push(("page".to_owned(), self.page.to_string()));
        query.push(("days".to_owned(), self.days.to_string()));
        Ok(query)
    }
}

/// Parameters for `GET /referrers/{ref_type}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferrerParams {
    pub section: Option<String>,
    pub tag: Option<String>,
    pub domain: Option<String>,
    /// Trailing window in days.
    pub days: u32,
    pub dates: DateFilter,
}

impl Default for ReferrerParams {
    fn default() -> Self {
        Self {
            section: None,
            tag: None,
            domain: None,
            days: 3,
            dates: DateFilter::default(),
        }
    }
}

impl ReferrerParams {
    pub(crate) fn query_pairs(&self) -> Result<Vec<(String, String)>, Error> {
        let mut query = Vec::new();
        push_opt(&mut query, "section", self.section.as_deref());
        push_opt(&mut query, "tag", self.tag.as_deref());
        push_opt(&mut query, "domain", self.domain.as_deref());
        query.push(("days".to_owned(), self.days.to_string()));
        self.dates.append_to(&mut query)?;
        Ok(query)
    }
}

/// Parameters for `GET /referrers/{ref_type}/{meta}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferrerMetaParams {
    pub section: Option<String>,
    pub domain: Option<String>,
    pub days: u32,
    pub dates: DateFilter,
}

impl Default for ReferrerMetaParams {
    fn default() -> Self {
        Self {
            section: None,
            domain: None,
            days: 3,
            dates: DateFilter::default(),
        }
    }
}

impl ReferrerMetaParams {
    pub(crate) fn query_pairs(&self) -> Result<Vec<(String, String)>, Error> {
        let mut query = Vec::new();
        push_opt(&mut query, "section", self.section.as_deref());
        push_opt(&mut query, "domain", self.domain.as_deref());
        query.push(("days".to_owned(), self.days.to_string()));
        self.dates.append_to(&mut query)?;
        Ok(query)
    }
}

/// Parameters for `GET /referrers/{ref_type}/{meta}/{value}/detail`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferrerDetailParams {
    pub domain: Option<String>,
    pub days: u32,
    pub dates: DateFilter,
}

impl Default for ReferrerDetailParams {
    fn default() -> Self {
        Self {
            domain: None,
            days: 3,
            dates: DateFilter::default(),
        }
    }
}

impl ReferrerDetailParams {
    pub(crate) fn query_pairs(&self) -> Result<Vec<(String, String)>, Error> {
        let mut query = Vec::new();
        push_opt(&mut query, "domain", self.domain.as_deref());
        query.push(("days".to_owned(), self.days.to_string()));
        self.dates.append_to(&mut query)?;
        Ok(query)
    }
}

/// Parameters for `GET /referrers/post/detail`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferrerPostParams {
    pub days: u32,
    pub dates: DateFilter,
}

impl Default for ReferrerPostParams {
    fn default() -> Self {
        Self {
            days: 3,
            dates: DateFilter::default(),
        }
    }
}

impl ReferrerPostParams {
    pub(crate) fn query_pairs(&self) -> Result<Vec<(String, String)>, Error> {
        let mut query = vec![("days".to_owned(), self.days.to_string())];
        self.dates.append_to(&mut query)?;
        Ok(query)
    }
}

/// Parameters for the `/shares/*` listing endpoints.
///
/// Shares are windowed by publish date, so `days` renders as `pub_days`
/// and the date pair as `pub_date_start`/`pub_date_end`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SharesParams {
    pub days: u32,
    pub pub_date_start: Option<NaiveDate>,
    pub pub_date_end: Option<NaiveDate>,
    pub limit: u32,
    pub page: u32,
}

impl Default for SharesParams {
    fn default() -> Self {
        Self {
            days: 14,
            pub_date_start: None,
            pub_date_end: None,
            limit: 10,
            page: 1,
        }
    }
}

impl SharesParams {
    pub(crate) fn query_pairs(&self) -> Result<Vec<(String, String)>, Error> {
        let mut query = vec![("pub_days".to_owned(), self.days.to_string())];
        append_date_pair(
            &mut query,
            "pub_date_start",
            "pub_date_end",
            self.pub_date_start,
            self.pub_date_end,
        )?;
        query.push(("limit".to_owned(), self.limit.to_string()));
        query.push(("page".to_owned(), self.page.to_string()));
        Ok(query)
    }
}

/// Aggregation window for the realtime endpoints, rendered as the `time`
/// parameter (`"2h"`, `"30m"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RealtimePeriod {
    Hours(u32),
    Minutes(u32),
}

impl fmt::Display for RealtimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RealtimePeriod::Hours(n) => write!(f, "{n}h"),
            RealtimePeriod::Minutes(n) => write!(f, "{n}m"),
        }
    }
}

/// Parameters for the `/realtime/*` endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RealtimeParams {
    pub period: Option<RealtimePeriod>,
    pub limit: u32,
    pub page: u32,
}

impl Default for RealtimeParams {
    fn default() -> Self {
        Self {
            period: None,
            limit: 10,
            page: 1,
        }
    }
}

impl RealtimeParams {
    pub(crate) fn query_pairs(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("limit".to_owned(), self.limit.to_string()),
            ("page".to_owned(), self.page.to_string()),
        ];
        if let Some(period) = self.period {
            query.push(("time".to_owned(), period.to_string()));
        }
        query
    }
}

/// Lookup key for `GET /related`: exactly one of a canonical post URL or a
/// visitor uuid.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RelatedKey {
    Url(String),
    Uuid(String),
}

impl RelatedKey {
    pub(crate) fn query_pair(&self) -> (String, String) {
        match self {
            RelatedKey::Url(url) => ("url".to_owned(), url.clone()),
            RelatedKey::Uuid(uuid) => ("uuid".to_owned(), uuid.clone()),
        }
    }
}

/// Parameters for `GET /related`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelatedParams {
    pub days: u32,
    pub limit: u32,
    pub page: u32,
    pub boost: Metric,
    pub section: Option<String>,
}

impl Default for RelatedParams {
    fn default() -> Self {
        Self {
            days: 14,
            limit: 10,
            page: 1,
            boost: Metric::Views,
            section: None,
        }
    }
}

impl RelatedParams {
    pub(crate) fn query_pairs(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("days".to_owned(), self.days.to_string()),
            ("limit".to_owned(), self.limit.to_string()),
            ("page".to_owned(), self.page.to_string()),
            ("boost".to_owned(), self.boost.as_str().to_owned()),
        ];
        push_opt(&mut query, "section", self.section.as_deref());
        query
    }
}

/// Parameters for `GET /search`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchParams {
    pub limit: u32,
    pub page: u32,
    pub boost: Metric,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            limit: 10,
            page: 1,
            boost: Metric::Views,
        }
    }
}

impl SearchParams {
    pub(crate) fn query_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("limit".to_owned(), self.limit.to_string()),
            ("page".to_owned(), self.page.to_string()),
            ("boost".to_owned(), self.boost.as_str().to_owned()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn analytics_defaults_match_api_defaults() {
        let query = AnalyticsParams::default().query_pairs().unwrap();
        assert_eq!(
            query,
            vec![
                ("sort".to_owned(), "views".to_owned()),
                ("limit".to_owned(), "10".to_owned()),
                ("page".to_owned(), "1".to_owned()),
                ("days".to_owned(), "14".to_owned()),
            ]
        );
    }

    #[test]
    fn date_pairs_render_iso_dates() {
        let params = AnalyticsParams {
            dates: DateFilter::period(date(2013, 4, 1), date(2013, 4, 14)),
            ..AnalyticsParams::default()
        };
        let query = params.query_pairs().unwrap();
        assert_eq!(query[0], ("period_start".to_owned(), "2013-04-01".to_owned()));
        assert_eq!(query[1], ("period_end".to_owned(), "2013-04-14".to_owned()));
    }

    #[test]
    fn one_sided_period_is_rejected() {
        let params = AnalyticsParams {
            dates: DateFilter {
                period_start: Some(date(2013, 4, 1)),
                ..DateFilter::default()
            },
            ..AnalyticsParams::default()
        };
        let err = params.query_pairs().unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidParams);
    }

    #[test]
    fn one_sided_pub_date_is_rejected() {
        let filter = DateFilter {
            pub_date_end: Some(date(2013, 4, 14)),
            ..DateFilter::default()
        };
        let mut query = Vec::new();
        assert!(filter.append_to(&mut query).is_err());
    }

    #[test]
    fn empty_referrer_filters_are_skipped() {
        let params = ReferrerParams {
            section: Some(String::new()),
            tag: Some("tech".to_owned()),
            ..ReferrerParams::default()
        };
        let query = params.query_pairs().unwrap();
        assert_eq!(
            query,
            vec![
                ("tag".to_owned(), "tech".to_owned()),
                ("days".to_owned(), "3".to_owned()),
            ]
        );
    }

    #[test]
    fn shares_window_renders_pub_days() {
        let query = SharesParams::default().query_pairs().unwrap();
        assert_eq!(query[0], ("pub_days".to_owned(), "14".to_owned()));
    }

    #[test]
    fn realtime_period_renders_hours_and_minutes() {
        assert_eq!(RealtimePeriod::Hours(2).to_string(), "2h");
        assert_eq!(RealtimePeriod::Minutes(30).to_string(), "30m");
    }

    #[test]
    fn metric_round_trips_from_str() {
        for metric in Metric::ALL {
            assert_eq!(metric.as_str().parse::<Metric>().unwrap(), metric);
        }
        assert!("pageviews".parse::<Metric>().is_err());
    }

    #[test]
    fn aspect_rejects_unknown_values() {
        assert_eq!("topics".parse::<Aspect>().unwrap(), Aspect::Topics);
        assert!("channels".parse::<Aspect>().is_err());
    }

    #[test]
    fn related_key_renders_exactly_one_pair() {
        let url = RelatedKey::Url("https://example.com/a".to_owned());
        assert_eq!(
            url.query_pair(),
            ("url".to_owned(), "https://example.com/a".to_owned())
        );
        let uuid = RelatedKey::Uuid("visitor-1".to_owned());
        assert_eq!(uuid.query_pair(), ("uuid".to_owned(), "visitor-1".to_owned()));
    }
}
