//! Robots.txt strategy
//!
//! Loads the robots file, then walks every sitemap it declares, in declared
//! order, each to exhaustion before the next. The strategy proposes nothing of
//! its own: an unreachable robots file or one without sitemap declarations
//! simply yields no candidates.

use crate::collector::strategy::sitemap::SitemapWalk;
use crate::collector::strategy::{FetchResult, Step};
use crate::robots::declared_sitemaps;
use crate::SieveError;
use regex::Regex;

#[derive(Debug)]
enum State {
    Start,
    AwaitingRobots,
    Walking(SitemapWalk),
    Exhausted,
}

/// Dispatches to a sitemap walk for each sitemap declared in robots.txt
#[derive(Debug)]
pub struct RobotsTxtStrategy {
    robots_url: String,
    target_pattern: Regex,
    state: State,
}

impl RobotsTxtStrategy {
    /// Creates a strategy for the robots file at `robots_url`
    pub fn new(robots_url: String, target_pattern: Regex) -> Self {
        Self {
            robots_url,
            target_pattern,
            state: State::Start,
        }
    }

    /// Resumes with the outcome of the previous step
    pub fn advance(&mut self, outcome: Option<FetchResult>) -> Result<Step, SieveError> {
        match &mut self.state {
            State::Start => {
                tracing::debug!("Reading robots file: {}", self.robots_url);
                self.state = State::AwaitingRobots;
                Ok(Step::Load(self.robots_url.clone()))
            }
            State::AwaitingRobots => {
                let sitemaps = match outcome.as_ref().and_then(FetchResult::document) {
                    Some(document) => declared_sitemaps(document.source()),
                    None => {
                        tracing::warn!("Could not load robots file {}", self.robots_url);
                        Vec::new()
                    }
                };

                if sitemaps.is_empty() {
                    tracing::debug!("No sitemaps declared in {}", self.robots_url);
                    self.state = State::Exhausted;
                    return Ok(Step::Done);
                }

                for sitemap in &sitemaps {
                    tracing::debug!("Sitemap found: {}", sitemap);
                }

                let mut walk = SitemapWalk::new(self.target_pattern.clone(), sitemaps);
                let step = walk.advance(None)?;
                self.state = State::Walking(walk);
                Ok(step)
            }
            State::Walking(walk) => {
                let step = walk.advance(outcome)?;
                if step == Step::Done {
                    self.state = State::Exhausted;
                }
                Ok(step)
            }
            State::Exhausted => Ok(Step::Done),
        }
    }
}
