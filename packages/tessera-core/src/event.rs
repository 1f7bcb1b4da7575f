use crate::geometry::IVec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Click,
    Show,
    Sound,
}

/// A pointer or side-effect event.
///
/// `Click` and `Show` travel down the layout tree from the root; `Sound` only
/// ever travels up towards it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Pointer button press at absolute pixel coordinates.
    Click { pos: IVec2 },
    /// Hover probe at absolute pixel coordinates.
    Show { pos: IVec2 },
    /// Request to play a sound; `None` replays whatever clip is loaded.
    Sound { name: Option<String> },
}

impl Event {
    pub fn click(x: i32, y: i32) -> Self {
        Event::Click {
            pos: IVec2::new(x, y),
        }
    }

    pub fn show(x: i32, y: i32) -> Self {
        Event::Show {
            pos: IVec2::new(x, y),
        }
    }

    pub fn sound(name: Option<&str>) -> Self {
        Event::Sound {
            name: name.map(str::to_owned),
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Event::Click { .. } => EventKind::Click,
            Event::Show { .. } => EventKind::Show,
            Event::Sound { .. } => EventKind::Sound,
        }
    }

    /// Re-expresses a pointer event in a frame whose origin is `origin`.
    pub fn relative_to(&self, origin: IVec2) -> Self {
        match self {
            Event::Click { pos } => Event::Click {
                pos: offset_from(*pos, origin),
            },
            Event::Show { pos } => Event::Show {
                pos: offset_from(*pos, origin),
            },
            Event::Sound { .. } => self.clone(),
        }
    }
}

fn offset_from(pos: IVec2, origin: IVec2) -> IVec2 {
    IVec2::new(pos.x.saturating_sub(origin.x), pos.y.saturating_sub(origin.y))
}
