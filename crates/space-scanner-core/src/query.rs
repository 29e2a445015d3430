use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;

use time::Date;

use crate::catalog::Catalog;
use crate::model::{Mission, MissionStatus, Rocket, RocketStatus};
use crate::ScanError;

pub(crate) fn time_window(from: Date, to: Date) -> Result<RangeInclusive<Date>, ScanError> {
    if to < from {
        return Err(ScanError::InvalidTimeWindow(format!(
            "to ({to}) MUST NOT be before from ({from})"
        )));
    }
    Ok(from..=to)
}

fn require_positive(n: usize) -> Result<(), ScanError> {
    if n == 0 {
        return Err(ScanError::InvalidInput("n MUST be greater than zero".to_string()));
    }
    Ok(())
}

/// Key with the highest count; among equal counts the first key in map order wins.
fn first_max<K: Clone>(counts: &BTreeMap<K, usize>) -> Option<K> {
    let mut best: Option<(&K, usize)> = None;
    for (key, &count) in counts {
        match best {
            Some((_, best_count)) if best_count >= count => {}
            _ => best = Some((key, count)),
        }
    }
    best.map(|(key, _)| key.clone())
}

fn ascending_missing_last(left: Option<f64>, right: Option<f64>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => left.total_cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn descending_missing_last(left: Option<f64>, right: Option<f64>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => right.total_cmp(&left),
        _ => ascending_missing_last(left, right),
    }
}

impl Catalog {
    #[must_use]
    pub fn all_missions(&self) -> &[Mission] {
        &self.missions
    }

    #[must_use]
    pub fn missions_with_status(&self, status: MissionStatus) -> Vec<&Mission> {
        self.missions.iter().filter(|mission| mission.mission_status == status).collect()
    }

    /// Company with the most successful missions dated within `[from, to]`.
    ///
    /// Returns an empty string when the window holds no successes. Equal counts resolve to
    /// the lexicographically first company.
    ///
    /// # Errors
    /// Returns [`ScanError::InvalidTimeWindow`] when `to` is before `from`.
    pub fn company_with_most_successful_missions(
        &self,
        from: Date,
        to: Date,
    ) -> Result<String, ScanError> {
        let window = time_window(from, to)?;

        let mut successes = BTreeMap::<&str, usize>::new();
        for mission in self.successful_missions_within(&window) {
            *successes.entry(mission.company.as_str()).or_default() += 1;
        }

        Ok(first_max(&successes).map(str::to_string).unwrap_or_default())
    }

    /// Missions keyed by [`Mission::country`], each group in catalog order.
    #[must_use]
    pub fn missions_per_country(&self) -> BTreeMap<String, Vec<&Mission>> {
        let mut groups = BTreeMap::<String, Vec<&Mission>>::new();
        for mission in &self.missions {
            groups.entry(mission.country()).or_default().push(mission);
        }
        groups
    }

    /// Up to `n` matching missions, cheapest first. Missions without a cost come last and
    /// equal costs keep catalog order.
    ///
    /// # Errors
    /// Returns [`ScanError::InvalidInput`] when `n` is zero.
    pub fn top_n_least_expensive_missions(
        &self,
        n: usize,
        mission_status: MissionStatus,
        rocket_status: RocketStatus,
    ) -> Result<Vec<&Mission>, ScanError> {
        require_positive(n)?;

        let mut matching = self.missions_matching(mission_status, rocket_status);
        matching.sort_by(|left, right| ascending_missing_last(left.cost, right.cost));
        matching.truncate(n);
        Ok(matching)
    }

    /// Location with the most missions for every company.
    #[must_use]
    pub fn most_desired_location_per_company(&self) -> BTreeMap<String, String> {
        busiest_location_per_company(self.missions.iter())
    }

    /// Location with the most successful missions within `[from, to]` for every company.
    /// Companies without a success in the window are absent.
    ///
    /// # Errors
    /// Returns [`ScanError::InvalidTimeWindow`] when `to` is before `from`.
    pub fn location_with_most_successful_missions_per_company(
        &self,
        from: Date,
        to: Date,
    ) -> Result<BTreeMap<String, String>, ScanError> {
        let window = time_window(from, to)?;
        Ok(busiest_location_per_company(self.successful_missions_within(&window)))
    }

    #[must_use]
    pub fn all_rockets(&self) -> &[Rocket] {
        &self.rockets
    }

    /// Up to `n` rockets, tallest first. Rockets without a height come last.
    ///
    /// # Errors
    /// Returns [`ScanError::InvalidInput`] when `n` is zero.
    pub fn top_n_tallest_rockets(&self, n: usize) -> Result<Vec<&Rocket>, ScanError> {
        require_positive(n)?;

        let mut rockets = self.rockets.iter().collect::<Vec<_>>();
        rockets.sort_by(|left, right| descending_missing_last(left.height, right.height));
        rockets.truncate(n);
        Ok(rockets)
    }

    /// One entry per rocket name. A repeated name keeps the later row.
    #[must_use]
    pub fn wiki_page_per_rocket(&self) -> BTreeMap<String, Option<String>> {
        self.rockets.iter().map(|rocket| (rocket.name.clone(), rocket.wiki.clone())).collect()
    }

    /// Wiki pages of the rockets flown on the `n` most expensive matching missions.
    ///
    /// Rockets are reported in catalog order; rockets without a wiki page, or not present
    /// in the rocket table, are skipped.
    ///
    /// # Errors
    /// Returns [`ScanError::InvalidInput`] when `n` is zero.
    pub fn wiki_pages_for_rockets_used_in_most_expensive_missions(
        &self,
        n: usize,
        mission_status: MissionStatus,
        rocket_status: RocketStatus,
    ) -> Result<Vec<String>, ScanError> {
        require_positive(n)?;

        let mut matching = self.missions_matching(mission_status, rocket_status);
        matching.sort_by(|left, right| descending_missing_last(left.cost, right.cost));
        let flown = matching
            .into_iter()
            .take(n)
            .map(|mission| mission.detail.rocket_name.as_str())
            .collect::<BTreeSet<_>>();

        Ok(self
            .rockets
            .iter()
            .filter(|rocket| flown.contains(rocket.name.as_str()))
            .filter_map(|rocket| rocket.wiki.clone())
            .collect())
    }

    fn missions_matching(
        &self,
        mission_status: MissionStatus,
        rocket_status: RocketStatus,
    ) -> Vec<&Mission> {
        self.missions
            .iter()
            .filter(|mission| {
                mission.mission_status == mission_status && mission.rocket_status == rocket_status
            })
            .collect()
    }

    fn successful_missions_within<'a>(
        &'a self,
        window: &'a RangeInclusive<Date>,
    ) -> impl Iterator<Item = &'a Mission> + 'a {
        self.missions.iter().filter(move |mission| {
            mission.mission_status.is_success() && window.contains(&mission.date)
        })
    }
}

fn busiest_location_per_company<'a>(
    missions: impl Iterator<Item = &'a Mission>,
) -> BTreeMap<String, String> {
    let mut counts = BTreeMap::<&str, BTreeMap<&str, usize>>::new();
    for mission in missions {
        *counts
            .entry(mission.company.as_str())
            .or_default()
            .entry(mission.location.as_str())
            .or_default() += 1;
    }

    counts
        .into_iter()
        .filter_map(|(company, locations)| {
            first_max(&locations).map(|location| (company.to_string(), location.to_string()))
        })
        .collect()
}
