//! Events emitted by the reading engine

use super::types::EngineMetadata;

/// An engine notification, delivered in emission order
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The visible position changed
    Relocate,
    /// A page was turned
    Turn,
    Click,
    KeyDown(Key),
    ResourceReady,
    ResourceStart,
    ResourceEnd,
    ResourceFits,
    Navigate,
    /// Reading direction changed
    Direction(String),
    Metadata(EngineMetadata),
    /// Publication fully loaded
    Ready,
}

impl EngineEvent {
    /// Engine-side event name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Relocate => "relocate",
            Self::Turn => "turn",
            Self::Click => "click",
            Self::KeyDown(_) => "keydown",
            Self::ResourceReady => "resource.ready",
            Self::ResourceStart => "resource.start",
            Self::ResourceEnd => "resource.end",
            Self::ResourceFits => "resource.fits",
            Self::Navigate => "navigate",
            Self::Direction(_) => "direction",
            Self::Metadata(_) => "metadata",
            Self::Ready => "ready",
        }
    }

    /// Whether the event moves the reading position and so requires a
    /// progress recomputation
    pub fn affects_position(&self) -> bool {
        match self {
            Self::KeyDown(key) => key.is_navigation(),
            Self::Metadata(_) => false,
            _ => true,
        }
    }
}

/// Keyboard key reported with a keydown event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    PageUp,
    PageDown,
    Home,
    End,
    Other(String),
}

impl Key {
    /// Parse a DOM key name
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Home" => Self::Home,
            "End" => Self::End,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_navigation(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_keys() {
        for name in ["ArrowLeft", "ArrowRight", "PageUp", "PageDown", "Home", "End"] {
            assert!(Key::from_name(name).is_navigation(), "{}", name);
        }
        assert!(!Key::from_name("a").is_navigation());
        assert!(!Key::from_name("ArrowUp").is_navigation());
    }

    #[test]
    fn test_position_events() {
        assert!(EngineEvent::Relocate.affects_position());
        assert!(EngineEvent::Turn.affects_position());
        assert!(EngineEvent::ResourceFits.affects_position());
        assert!(EngineEvent::Direction("rtl".to_string()).affects_position());
        assert!(EngineEvent::KeyDown(Key::PageDown).affects_position());
        assert!(!EngineEvent::KeyDown(Key::from_name("x")).affects_position());
        assert!(!EngineEvent::Metadata(EngineMetadata::default()).affects_position());
    }
}
