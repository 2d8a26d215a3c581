use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use crate::app::posts::PostService;
use crate::domain::post::Post;
use crate::error::ApiError;

/// Two taps on the same target inside this window count as one double-tap.
pub const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeAction {
    Like,
    Unlike,
}

/// Handle for one in-flight toggle. Holds what the overlay looked like before
/// the toggle so a failed remote call can be rolled back.
#[derive(Debug)]
pub struct LikeToggle {
    pub post_id: String,
    pub action: LikeAction,
    generation: u64,
    previous: Option<HashSet<String>>,
}

#[derive(Debug)]
struct OverrideEntry {
    likers: HashSet<String>,
    generation: u64,
}

/// Local shadow of per-post liker sets, keyed by post id. A post with an
/// entry renders the entry; everything else falls back to the authoritative
/// set on the post itself. Entries live until `clear` (the next full
/// collection refresh) or a rollback.
///
/// Toggles are computed against the currently rendered state, so a second
/// toggle before the first resolves stacks on top of it; the last toggle
/// applied locally always wins, and a rollback of a superseded toggle is
/// ignored.
#[derive(Debug, Default)]
pub struct LikeOverlay {
    entries: HashMap<String, OverrideEntry>,
    generation: u64,
}

impl LikeOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// The liker set a screen should render for this post.
    pub fn likers<'a>(&'a self, post: &'a Post) -> &'a HashSet<String> {
        self.entries
            .get(post.id.as_str())
            .map(|entry| &entry.likers)
            .unwrap_or(&post.liked_by)
    }

    pub fn is_liked_by(&self, post: &Post, user_id: &str) -> bool {
        self.likers(post).contains(user_id)
    }

    pub fn like_count(&self, post: &Post) -> usize {
        self.likers(post).len()
    }

    pub fn has_override(&self, post_id: &str) -> bool {
        self.entries.contains_key(post_id)
    }

    /// Flip the acting user's membership against the rendered state and
    /// install the result immediately, before any network call resolves.
    pub fn toggle(&mut self, post: &Post, user_id: &str) -> LikeToggle {
        let mut likers = self.likers(post).clone();
        let action = if likers.remove(user_id) {
            LikeAction::Unlike
        } else {
            likers.insert(user_id.to_string());
            LikeAction::Like
        };

        self.generation += 1;
        let generation = self.generation;
        let previous = self
            .entries
            .insert(post.id.clone(), OverrideEntry { likers, generation })
            .map(|entry| entry.likers);

        LikeToggle {
            post_id: post.id.clone(),
            action,
            generation,
            previous,
        }
    }

    /// The remote call succeeded; the override stays in place as the
    /// rendered truth until the next refresh.
    pub fn commit(&mut self, toggle: LikeToggle) {
        tracing::debug!(post_id = %toggle.post_id, action = ?toggle.action, "toggle committed");
    }

    /// The remote call failed: restore what this toggle displaced, unless a
    /// newer toggle has taken ownership of the entry in the meantime.
    /// Returns whether anything was reverted.
    pub fn revert(&mut self, toggle: LikeToggle) -> bool {
        match self.entries.get(toggle.post_id.as_str()) {
            Some(entry) if entry.generation == toggle.generation => {}
            _ => return false,
        }
        match toggle.previous {
            Some(likers) => {
                self.entries.insert(
                    toggle.post_id,
                    OverrideEntry {
                        likers,
                        generation: toggle.generation,
                    },
                );
            }
            None => {
                self.entries.remove(toggle.post_id.as_str());
            }
        }
        true
    }

    /// Drop every override; called when an authoritative refresh lands.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// First tap on a target; nothing happens unless a second follows.
    Pending,
    /// Second tap on the same target inside the window.
    Toggle,
}

#[derive(Debug)]
enum TapState {
    Idle,
    AwaitingSecondTap { target: String, at: Instant },
}

/// Double-tap recognizer: {Idle, AwaitingSecondTap} with a fixed window.
/// A lone tap is discarded on expiry rather than treated as a single-tap
/// like; a second tap on a different target restarts the wait and fires
/// nothing for either post.
#[derive(Debug)]
pub struct DoubleTapDetector {
    state: TapState,
    window: Duration,
}

impl Default for DoubleTapDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl DoubleTapDetector {
    pub fn new() -> Self {
        Self::with_window(DOUBLE_TAP_WINDOW)
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            state: TapState::Idle,
            window,
        }
    }

    pub fn tap(&mut self, target: &str, at: Instant) -> TapOutcome {
        match std::mem::replace(&mut self.state, TapState::Idle) {
            TapState::AwaitingSecondTap {
                target: pending,
                at: first,
            } if pending == target && at.duration_since(first) <= self.window => TapOutcome::Toggle,
            _ => {
                self.state = TapState::AwaitingSecondTap {
                    target: target.to_string(),
                    at,
                };
                TapOutcome::Pending
            }
        }
    }

    /// Timer tick from the screen: a pending tap older than the window goes
    /// back to Idle as a no-op.
    pub fn expire(&mut self, now: Instant) {
        if let TapState::AwaitingSecondTap { at, .. } = &self.state {
            if now.duration_since(*at) > self.window {
                self.state = TapState::Idle;
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, TapState::Idle)
    }
}

/// What the screen animates after a recognized double-tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoubleTapEffect {
    pub action: LikeAction,
    pub show_heart: bool,
}

/// Ties the overlay, the double-tap recognizer and the remote like calls
/// together. One per feed screen.
pub struct InteractionController {
    posts: PostService,
    overlay: LikeOverlay,
    detector: DoubleTapDetector,
}

impl InteractionController {
    pub fn new(posts: PostService) -> Self {
        Self {
            posts,
            overlay: LikeOverlay::new(),
            detector: DoubleTapDetector::new(),
        }
    }

    pub fn overlay(&self) -> &LikeOverlay {
        &self.overlay
    }

    pub fn is_liked_by(&self, post: &Post, user_id: &str) -> bool {
        self.overlay.is_liked_by(post, user_id)
    }

    pub fn like_count(&self, post: &Post) -> usize {
        self.overlay.like_count(post)
    }

    /// Optimistic toggle: the override is visible before the remote call is
    /// issued; a failure rolls it back and surfaces the error.
    pub async fn toggle_like(
        &mut self,
        post: &Post,
        user_id: &str,
    ) -> Result<LikeAction, ApiError> {
        let toggle = self.overlay.toggle(post, user_id);
        let action = toggle.action;
        let result = match action {
            LikeAction::Like => self.posts.like(&post.id, user_id).await,
            LikeAction::Unlike => self.posts.unlike(&post.id, user_id).await,
        };
        match result {
            Ok(()) => {
                self.overlay.commit(toggle);
                Ok(action)
            }
            Err(err) => {
                self.overlay.revert(toggle);
                Err(err)
            }
        }
    }

    /// Tap entry point for the gesture path. Two taps on the same post inside
    /// the window produce exactly one toggle and one heart animation.
    pub async fn double_tap(
        &mut self,
        post: &Post,
        user_id: &str,
        at: Instant,
    ) -> Result<Option<DoubleTapEffect>, ApiError> {
        match self.detector.tap(&post.id, at) {
            TapOutcome::Pending => Ok(None),
            TapOutcome::Toggle => {
                let action = self.toggle_like(post, user_id).await?;
                Ok(Some(DoubleTapEffect {
                    action,
                    show_heart: true,
                }))
            }
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.detector.expire(now);
    }

    /// Called when an authoritative collection refresh replaces the rendered
    /// posts.
    pub fn clear_overrides(&mut self) {
        self.overlay.clear();
    }
}
