use std::collections::HashMap;
use std::io::Write;

use time::Date;

use crate::catalog::Catalog;
use crate::cipher::Cipher;
use crate::model::Rocket;
use crate::query::time_window;
use crate::ScanError;

/// `(2s + (p - s)) / (2p)` in truncating integer arithmetic, where `p` counts the missions a
/// rocket flew and `s` the successful ones. Only a spotless record scores 1.
#[must_use]
pub fn reliability_from_counts(participated: u64, successful: u64) -> u64 {
    if participated == 0 {
        return 0;
    }
    let successful = successful.min(participated);
    (2 * successful + (participated - successful)) / (2 * participated)
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    participated: u64,
    successful: u64,
}

impl Catalog {
    fn tallies_by_rocket_name(&self) -> HashMap<&str, Tally> {
        let mut tallies = HashMap::<&str, Tally>::new();
        for mission in &self.missions {
            let tally = tallies.entry(mission.detail.rocket_name.as_str()).or_default();
            tally.participated += 1;
            if mission.mission_status.is_success() {
                tally.successful += 1;
            }
        }
        tallies
    }

    /// Score of `rocket` over every mission naming it; zero when it never flew.
    #[must_use]
    pub fn reliability_score(&self, rocket: &Rocket) -> u64 {
        let tally = self
            .tallies_by_rocket_name()
            .get(rocket.name.as_str())
            .copied()
            .unwrap_or_default();
        reliability_from_counts(tally.participated, tally.successful)
    }

    /// Highest scoring rocket; the earliest rocket in catalog order wins a tie.
    #[must_use]
    pub fn most_reliable_rocket(&self) -> Option<&Rocket> {
        let tallies = self.tallies_by_rocket_name();
        let mut best: Option<(&Rocket, u64)> = None;

        for rocket in &self.rockets {
            let tally = tallies.get(rocket.name.as_str()).copied().unwrap_or_default();
            let score = reliability_from_counts(tally.participated, tally.successful);
            match best {
                Some((_, best_score)) if best_score >= score => {}
                _ => best = Some((rocket, score)),
            }
        }

        best.map(|(rocket, _)| rocket)
    }
}

/// A loaded [`Catalog`] paired with the cipher used for reports.
#[derive(Debug)]
pub struct SpaceScanner<C> {
    catalog: Catalog,
    cipher: C,
}

impl<C: Cipher> SpaceScanner<C> {
    #[must_use]
    pub fn new(catalog: Catalog, cipher: C) -> Self {
        Self { catalog, cipher }
    }

    /// # Errors
    /// Returns [`ScanError::MalformedRecord`] when either table fails to parse.
    pub fn from_csv(
        missions: Option<&str>,
        rockets: Option<&str>,
        cipher: C,
    ) -> Result<Self, ScanError> {
        Ok(Self::new(Catalog::from_csv(missions, rockets)?, cipher))
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn cipher(&self) -> &C {
        &self.cipher
    }

    /// Encrypt the name of the most reliable rocket and write the ciphertext to `destination`.
    ///
    /// The window is validated but does not restrict which missions are scored.
    ///
    /// # Errors
    /// - [`ScanError::InvalidTimeWindow`] when `to` is before `from`.
    /// - [`ScanError::InvalidInput`] when there are no rockets to rank.
    /// - [`ScanError::CipherFailure`] when encryption or writing fails.
    pub fn save_most_reliable_rocket<W: Write>(
        &self,
        destination: &mut W,
        from: Date,
        to: Date,
    ) -> Result<(), ScanError> {
        time_window(from, to)?;

        let rocket = self.catalog.most_reliable_rocket().ok_or_else(|| {
            ScanError::InvalidInput("rocket collection MUST NOT be empty".to_string())
        })?;

        let ciphertext = self.cipher.encrypt(rocket.name.as_bytes())?;
        destination
            .write_all(&ciphertext)
            .and_then(|()| destination.flush())
            .map_err(|err| ScanError::CipherFailure(format!("writing report failed: {err}")))?;

        tracing::info!(
            rocket = %rocket.name,
            bytes = ciphertext.len(),
            "wrote most reliable rocket report"
        );
        Ok(())
    }
}
