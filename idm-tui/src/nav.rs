//! Navigation and view switching utilities.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    HostGroups,
    IdViewSettings,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::HostGroups => "Host groups",
            View::IdViewSettings => "ID view settings",
        }
    }

    pub fn all() -> &'static [View] {
        &[View::HostGroups, View::IdViewSettings]
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|v| v == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<View> {
        Self::all().get(index).copied()
    }

    pub fn next(&self) -> View {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> View {
        let idx = self.index();
        let all = Self::all();
        let prev = if idx == 0 { all.len() - 1 } else { idx - 1 };
        all[prev]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_and_previous_wrap() {
        assert_eq!(View::HostGroups.next(), View::IdViewSettings);
        assert_eq!(View::IdViewSettings.next(), View::HostGroups);
        assert_eq!(View::HostGroups.previous(), View::IdViewSettings);
        assert_eq!(View::from_index(5), None);
    }
}
