use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifiant fort pour une personne de la rotation
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Nature d'un événement du planning
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutyKind {
    Hospital,
    OnCall,
    Lane,
    Off,
    Weekend,
    WeekendLane,
}

impl DutyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DutyKind::Hospital => "hospital",
            DutyKind::OnCall => "on_call",
            DutyKind::Lane => "lane",
            DutyKind::Off => "off",
            DutyKind::Weekend => "weekend",
            DutyKind::WeekendLane => "weekend_lane",
        }
    }
}

/// Événement de garde (heure flottante). Valeur immuable une fois produite.
///
/// `start <= end` n'est pas garanti : une fenêtre mal saisie produit une
/// durée négative, acceptée telle quelle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    title: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    kind: DutyKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    person: Option<PersonId>,
}

impl Event {
    /// Le titre est dérivé de la nature et du titulaire.
    pub fn new(
        kind: DutyKind,
        person: Option<&PersonId>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        let title = match (kind, person) {
            (DutyKind::Hospital, Some(p)) => format!("HOSPITAL {p}"),
            (DutyKind::OnCall, Some(p)) => format!("ODC {p}"),
            (DutyKind::Off, Some(p)) => format!("OFF {p}"),
            (DutyKind::Weekend, Some(p)) => format!("Weekend {p}"),
            (DutyKind::Lane, _) => "ODC Lane".to_string(),
            (DutyKind::WeekendLane, _) => "Weekend Lane".to_string(),
            (kind, None) => kind.as_str().to_uppercase(),
        };
        Self {
            title,
            start,
            end,
            kind,
            person: person.cloned(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }
    pub fn kind(&self) -> DutyKind {
        self.kind
    }
    pub fn person(&self) -> Option<&PersonId> {
        self.person.as_ref()
    }

    /// Durée en minutes (négative si la fenêtre est inversée).
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Planning complet, trié par début croissant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schedule {
    events: Vec<Event>,
}

impl Schedule {
    /// Tri stable : à début égal, l'ordre d'entrée est conservé.
    pub fn new(mut events: Vec<Event>) -> Self {
        events.sort_by_key(|e| e.start);
        Self { events }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    pub fn is_sorted(&self) -> bool {
        self.events.windows(2).all(|w| w[0].start <= w[1].start)
    }

    pub fn events_for<'a>(&'a self, person: &'a PersonId) -> impl Iterator<Item = &'a Event> + 'a {
        self.events
            .iter()
            .filter(move |e| e.person.as_ref() == Some(person))
    }

    /// Nombre d'événements par personne et par nature (les événements lane
    /// n'ont pas de titulaire et ne sont pas comptés).
    pub fn duty_counts(&self) -> BTreeMap<PersonId, BTreeMap<DutyKind, usize>> {
        let mut out: BTreeMap<PersonId, BTreeMap<DutyKind, usize>> = BTreeMap::new();
        for e in &self.events {
            if let Some(p) = &e.person {
                *out.entry(p.clone()).or_default().entry(e.kind).or_default() += 1;
            }
        }
        out
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
