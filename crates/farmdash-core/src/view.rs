//! Screen routing for the dashboard front ends.
//!
//! The current screen is a plain [`View`] value. Front ends keep it, feed
//! user [`Action`]s through [`View::apply`] and pass it to [`render`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use farmdash_types::{AlertKind, Field, ParseError, timestamp};

use crate::dashboard::Snapshot;
use crate::trend;

/// Which screen is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Home,
    Weather,
    Moisture,
    Animals,
}

/// A user request to change screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    ShowWeather,
    ShowMoisture,
    ShowAnimals,
    Back,
}

impl View {
    pub const ALL: [View; 4] = [View::Home, View::Weather, View::Moisture, View::Animals];

    /// The view after `action`.
    ///
    /// `Show*` actions only work from home; `Back` always returns home.
    pub fn apply(self, action: Action) -> View {
        match (self, action) {
            (_, Action::Back) => View::Home,
            (View::Home, Action::ShowWeather) => View::Weather,
            (View::Home, Action::ShowMoisture) => View::Moisture,
            (View::Home, Action::ShowAnimals) => View::Animals,
            (view, _) => view,
        }
    }

    /// Actions offered on this view.
    pub fn actions(self) -> &'static [Action] {
        match self {
            View::Home => &[Action::ShowWeather, Action::ShowMoisture, Action::ShowAnimals],
            _ => &[Action::Back],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Home => "Farm Dashboard",
            View::Weather => "Weather",
            View::Moisture => "Soil Moisture",
            View::Animals => "Animal Detection",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            View::Home => "home",
            View::Weather => "weather",
            View::Moisture => "moisture",
            View::Animals => "animals",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home" => Ok(View::Home),
            "weather" => Ok(View::Weather),
            "moisture" => Ok(View::Moisture),
            "animals" | "animal" => Ok(View::Animals),
            _ => Err(ParseError::UnknownView(s.trim().to_string())),
        }
    }
}

impl Action {
    /// Single-key shortcut.
    pub fn key(self) -> char {
        match self {
            Action::ShowWeather => 'w',
            Action::ShowMoisture => 'm',
            Action::ShowAnimals => 'a',
            Action::Back => 'b',
        }
    }

    pub fn from_key(key: char) -> Option<Action> {
        match key.to_ascii_lowercase() {
            'w' => Some(Action::ShowWeather),
            'm' => Some(Action::ShowMoisture),
            'a' => Some(Action::ShowAnimals),
            'b' => Some(Action::Back),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::ShowWeather => "Weather",
            Action::ShowMoisture => "Moisture",
            Action::ShowAnimals => "Animals",
            Action::Back => "Back",
        }
    }
}

/// Soil moisture status derived from the newest reading's humidity alerts.
pub fn moisture_status(snapshot: &Snapshot) -> &'static str {
    if snapshot.latest().is_none() {
        return "No readings yet";
    }
    let fired = |kind: AlertKind| snapshot.alerts.iter().any(|a| a.kind == kind);
    if fired(AlertKind::HumidityLow) {
        "Dry: irrigation needed"
    } else if fired(AlertKind::HumidityHigh) {
        "Waterlogged: hold irrigation"
    } else {
        "Optimal"
    }
}

/// Render `view` as plain text lines.
pub fn render(view: View, snapshot: &Snapshot) -> Vec<String> {
    let mut lines = vec![view.title().to_string(), String::new()];

    match view {
        View::Home => {
            match snapshot.latest() {
                Some(r) => lines.push(format!(
                    "Latest reading #{} at {}: {}",
                    r.id,
                    timestamp::format(&r.timestamp),
                    Field::ALL
                        .iter()
                        .map(|f| format!("{} {}{}", f, r.measurement().get(*f), f.unit()))
                        .collect::<Vec<_>>()
                        .join(", ")
                )),
                None => lines.push("No readings yet".to_string()),
            }
            lines.push(format!("Readings stored: {}", snapshot.readings.len()));
            if let Some(line) = trend::temperature_line(&snapshot.readings, trend::DEFAULT_WIDTH) {
                lines.push(format!("Temperature trend: {}", line));
            }

            lines.push(String::new());
            if snapshot.alerts.is_empty() {
                lines.push("All readings within range".to_string());
            } else {
                for alert in &snapshot.alerts {
                    lines.push(format!("[{}] {}. {}", alert.severity, alert, alert.kind.action()));
                }
            }

            lines.push(String::new());
            lines.push("Recent events:".to_string());
            if snapshot.events.is_empty() {
                lines.push("  (none)".to_string());
            }
            lines.extend(snapshot.events.iter().map(|e| format!("  {}", e)));
        }
        View::Weather => match snapshot.latest() {
            Some(r) => {
                lines.push(format!("Temperature: {}{}", r.temperature, Field::Temperature.unit()));
                lines.push(format!("Humidity: {}{}", r.humidity, Field::Humidity.unit()));
                lines.push(format!("Observed at {}", timestamp::format(&r.timestamp)));
            }
            None => lines.push("No readings yet".to_string()),
        },
        View::Moisture => {
            if let Some(r) = snapshot.latest() {
                lines.push(format!("Humidity: {}{}", r.humidity, Field::Humidity.unit()));
            }
            lines.push(format!("Status: {}", moisture_status(snapshot)));
        }
        View::Animals => match snapshot.animal {
            Some(animal) => lines.push(format!("Detected animal: {}", animal)),
            None => lines.push("No animal detected".to_string()),
        },
    }

    lines.push(String::new());
    lines.push(
        view.actions()
            .iter()
            .map(|a| format!("[{}] {}", a.key(), a.label()))
            .collect::<Vec<_>>()
            .join("  "),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use farmdash_types::{AlertSignal, Animal, Reading, Severity};
    use time::macros::datetime;

    fn snapshot(humidity: f64, alerts: Vec<AlertSignal>) -> Snapshot {
        Snapshot {
            readings: vec![Reading {
                id: 3,
                timestamp: datetime!(2024-05-01 08:00:00),
                temperature: 22.5,
                humidity,
                ph: 6.5,
            }],
            alerts,
            events: vec!["2024-05-01 08:00:00 - Simulated sensor event".to_string()],
            animal: Some(Animal::Deer),
        }
    }

    fn empty() -> Snapshot {
        Snapshot {
            readings: Vec::new(),
            alerts: Vec::new(),
            events: Vec::new(),
            animal: None,
        }
    }

    #[test]
    fn test_show_actions_from_home() {
        assert_eq!(View::Home.apply(Action::ShowWeather), View::Weather);
        assert_eq!(View::Home.apply(Action::ShowMoisture), View::Moisture);
        assert_eq!(View::Home.apply(Action::ShowAnimals), View::Animals);
        assert_eq!(View::Home.apply(Action::Back), View::Home);
    }

    #[test]
    fn test_back_always_returns_home() {
        for view in View::ALL {
            assert_eq!(view.apply(Action::Back), View::Home);
        }
    }

    #[test]
    fn test_show_actions_ignored_off_home() {
        assert_eq!(View::Weather.apply(Action::ShowAnimals), View::Weather);
        assert_eq!(View::Animals.apply(Action::ShowMoisture), View::Animals);
        assert_eq!(View::Moisture.apply(Action::ShowMoisture), View::Moisture);
    }

    #[test]
    fn test_offered_actions_are_the_ones_that_move() {
        for view in View::ALL {
            for action in view.actions() {
                assert_ne!(view.apply(*action), view, "{view} {action:?}");
            }
        }
    }

    #[test]
    fn test_key_round_trip() {
        for action in [
            Action::ShowWeather,
            Action::ShowMoisture,
            Action::ShowAnimals,
            Action::Back,
        ] {
            assert_eq!(Action::from_key(action.key()), Some(action));
        }
        assert_eq!(Action::from_key('W'), Some(Action::ShowWeather));
        assert_eq!(Action::from_key('x'), None);
    }

    #[test]
    fn test_view_from_str() {
        assert_eq!("Weather".parse::<View>().unwrap(), View::Weather);
        assert_eq!("animal".parse::<View>().unwrap(), View::Animals);
        assert_eq!(
            " Barn ".parse::<View>(),
            Err(ParseError::UnknownView("Barn".to_string()))
        );
    }

    #[test]
    fn test_moisture_status() {
        let dry = AlertSignal {
            kind: AlertKind::HumidityLow,
            severity: Severity::Warning,
            value: 20.0,
            limit: 30.0,
        };
        assert_eq!(moisture_status(&snapshot(20.0, vec![dry])), "Dry: irrigation needed");
        assert_eq!(moisture_status(&snapshot(50.0, Vec::new())), "Optimal");
        assert_eq!(moisture_status(&empty()), "No readings yet");
    }

    #[test]
    fn test_render_home() {
        let lines = render(View::Home, &snapshot(50.0, Vec::new()));
        assert_eq!(lines[0], "Farm Dashboard");
        assert!(lines.iter().any(|l| l.starts_with("Latest reading #3")));
        assert!(lines.iter().any(|l| l == "All readings within range"));
        assert!(lines.iter().any(|l| l.ends_with("Simulated sensor event")));
        assert_eq!(
            lines.last().map(String::as_str),
            Some("[w] Weather  [m] Moisture  [a] Animals")
        );
    }

    #[test]
    fn test_render_home_temperature_trend() {
        let mut snap = snapshot(50.0, Vec::new());
        snap.readings.push(Reading {
            id: 2,
            timestamp: datetime!(2024-05-01 07:00:00),
            temperature: 18.5,
            humidity: 55.0,
            ph: 6.8,
        });

        let lines = render(View::Home, &snap);
        assert!(lines.contains(&"Temperature trend: ▁█ (18.5 to 22.5 °C)".to_string()));
    }

    #[test]
    fn test_render_subviews_offer_back() {
        let snap = snapshot(50.0, Vec::new());
        for view in [View::Weather, View::Moisture, View::Animals] {
            let lines = render(view, &snap);
            assert_eq!(lines[0], view.title());
            assert_eq!(lines.last().map(String::as_str), Some("[b] Back"));
        }

        let animals = render(View::Animals, &snap);
        assert!(animals.contains(&"Detected animal: Deer".to_string()));
    }

    #[test]
    fn test_render_empty_snapshot() {
        let lines = render(View::Home, &empty());
        assert!(lines.contains(&"No readings yet".to_string()));
        assert!(lines.contains(&"  (none)".to_string()));

        let lines = render(View::Animals, &empty());
        assert!(lines.contains(&"No animal detected".to_string()));
    }
}
