//! Main content area state: the visible list view and navigation history

use super::list_state::{ListChange, ListQuery, ListState, RequestToken};
use super::pagination::PageSize;
use super::route::{Location, ViewKind};
use super::track::{Artist, Track};

/// The list shown in the main content area
#[derive(Clone, Debug, Default)]
pub enum ContentView {
    #[default]
    Empty,
    Tracks(ListState<Track>),
    Artists(ListState<Artist>),
}

impl ContentView {
    pub fn open(location: &Location, default_page_size: PageSize) -> Self {
        if location.kind.shows_tracks() {
            Self::Tracks(ListState::from_location(location, default_page_size))
        } else {
            Self::Artists(ListState::from_location(location, default_page_size))
        }
    }

    pub fn kind(&self) -> Option<ViewKind> {
        match self {
            Self::Empty => None,
            Self::Tracks(list) => Some(list.kind),
            Self::Artists(list) => Some(list.kind),
        }
    }

    pub fn location(&self) -> Option<Location> {
        match self {
            Self::Empty => None,
            Self::Tracks(list) => Some(list.location()),
            Self::Artists(list) => Some(list.location()),
        }
    }

    pub fn apply(&mut self, change: ListChange) -> bool {
        match self {
            Self::Empty => false,
            Self::Tracks(list) => list.apply(change),
            Self::Artists(list) => list.apply(change),
        }
    }

    pub fn begin_load(&mut self, token: RequestToken) -> Option<ListQuery> {
        match self {
            Self::Empty => None,
            Self::Tracks(list) => {
                list.begin_load(token);
                Some(list.query())
            }
            Self::Artists(list) => {
                list.begin_load(token);
                Some(list.query())
            }
        }
    }

    pub fn move_up(&mut self) {
        match self {
            Self::Empty => {}
            Self::Tracks(list) => list.move_up(),
            Self::Artists(list) => list.move_up(),
        }
    }

    pub fn move_down(&mut self) {
        match self {
            Self::Empty => {}
            Self::Tracks(list) => list.move_down(),
            Self::Artists(list) => list.move_down(),
        }
    }

    pub fn move_by(&mut self, delta: isize) {
        match self {
            Self::Empty => {}
            Self::Tracks(list) => list.move_by(delta),
            Self::Artists(list) => list.move_by(delta),
        }
    }
}

/// State for the main content area
#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub view: ContentView,
    pub navigation_stack: Vec<ContentView>,
    next_seq: u64,
}

impl ContentState {
    /// Hand out the next load token. Tokens only ever increase.
    pub fn issue_token(&mut self) -> RequestToken {
        self.next_seq += 1;
        RequestToken(self.next_seq)
    }
}
