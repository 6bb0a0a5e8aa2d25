use std::{ops::RangeInclusive, time::Duration};

use installer_client::{City, InstallerRecord, BUSINESS_PREFIXES, BUSINESS_SUFFIXES, SERVICES};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::pipeline::{Envelope, EnvelopeStream, PipelineError, Source};

/// Installers listed per city when nothing else is configured.
pub const DEFAULT_PER_CITY: RangeInclusive<u32> = 5..=10;

/// Simulated scrape of utility Qualified Product Lists.
///
/// Walks `cities` in order, pausing `latency` before each one to stand in for
/// a network fetch, and yields a random number of synthetic installers per
/// city drawn from `per_city`. Records of one city are all yielded before the
/// next city starts. This source never yields an error.
pub struct QplScrapeSource {
    cities: Vec<City>,
    per_city: RangeInclusive<u32>,
    latency: Duration,
    seed: Option<u64>,
}

impl QplScrapeSource {
    /// Fails when `per_city` is empty (its start is past its end).
    pub fn new(
        cities: Vec<City>,
        per_city: RangeInclusive<u32>,
        latency: Duration,
        seed: Option<u64>,
    ) -> Result<Self, PipelineError> {
        if per_city.is_empty() {
            return Err(PipelineError::Source(format!(
                "empty installers-per-city range {}..={}",
                per_city.start(),
                per_city.end()
            )));
        }
        Ok(Self {
            cities,
            per_city,
            latency,
            seed,
        })
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, words: &[&'a str]) -> &'a str {
    words[rng.random_range(0..words.len())]
}

fn random_phone<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{}-{}-{}",
        rng.random_range(200..=999),
        rng.random_range(200..=999),
        rng.random_range(1000..=9999)
    )
}

/// A single synthetic installer in `city`.
pub fn synthesize_installer<R: Rng + ?Sized>(rng: &mut R, city: &City) -> InstallerRecord {
    let business_name = format!(
        "{} {}",
        pick(rng, &BUSINESS_PREFIXES),
        pick(rng, &BUSINESS_SUFFIXES)
    );
    let license_number = format!("LIC-{}", rng.random_range(10_000..=99_999));
    let phone = random_phone(rng);

    InstallerRecord::in_city(city, business_name, license_number, phone, SERVICES, true)
}

/// Draws a count from `per_city` and synthesizes that many installers.
///
/// # Panics
///
/// Panics if `per_city` is empty.
pub fn synthesize_city<R: Rng + ?Sized>(
    rng: &mut R,
    city: &City,
    per_city: RangeInclusive<u32>,
) -> Vec<InstallerRecord> {
    let count = rng.random_range(per_city);
    (0..count).map(|_| synthesize_installer(rng, city)).collect()
}

/// All installers for `cities`, grouped by city in table order.
///
/// An empty table gives an empty result.
///
/// # Panics
///
/// Panics if `per_city` is empty and `cities` is not.
pub fn generate_installers<R: Rng + ?Sized>(
    rng: &mut R,
    cities: &[City],
    per_city: RangeInclusive<u32>,
) -> Vec<InstallerRecord> {
    cities
        .iter()
        .flat_map(|city| synthesize_city(rng, city, per_city.clone()))
        .collect()
}

#[async_trait::async_trait]
impl Source<InstallerRecord> for QplScrapeSource {
    async fn stream(&self) -> EnvelopeStream<InstallerRecord> {
        let cities = self.cities.clone();
        let per_city = self.per_city.clone();
        let latency = self.latency;
        let seed = self.seed;

        let s = async_stream::stream! {
            let mut rng = make_rng(seed);
            let mut extracted: usize = 0;

            for city in &cities {
                tracing::info!(
                    city = city.name,
                    state = city.state,
                    utility = city.utility,
                    "scraping region"
                );
                if !latency.is_zero() {
                    tokio::time::sleep(latency).await;
                }

                let records = synthesize_city(&mut rng, city, per_city.clone());
                extracted += records.len();
                metrics::counter!("qpl_scraped_records_total").increment(records.len() as u64);

                for record in records {
                    yield Ok::<_, PipelineError>(Envelope::now(record));
                }
            }

            tracing::info!(records = extracted, "scrape complete");
        };

        Box::pin(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use installer_client::CITIES;

    fn in_range(s: &str, lo: u32, hi: u32) -> bool {
        s.chars().all(|c| c.is_ascii_digit())
            && s.parse::<u32>().map(|v| (lo..=hi).contains(&v)).unwrap_or(false)
    }

    #[test]
    fn license_and_phone_follow_their_patterns() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let rec = synthesize_installer(&mut rng, &CITIES[0]);

            let digits = rec.license_number.strip_prefix("LIC-").unwrap();
            assert_eq!(digits.len(), 5);
            assert!(in_range(digits, 10_000, 99_999), "{}", rec.license_number);

            let parts: Vec<&str> = rec.phone.split('-').collect();
            assert_eq!(parts.len(), 3, "{}", rec.phone);
            assert_eq!(parts[0].len(), 3);
            assert_eq!(parts[1].len(), 3);
            assert_eq!(parts[2].len(), 4);
            assert!(in_range(parts[0], 200, 999));
            assert!(in_range(parts[1], 200, 999));
            assert!(in_range(parts[2], 1000, 9999));
        }
    }

    #[test]
    fn business_name_uses_catalog_fragments() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let rec = synthesize_installer(&mut rng, &CITIES[3]);
            let (prefix, suffix) = rec.business_name.split_once(' ').unwrap();
            assert!(BUSINESS_PREFIXES.contains(&prefix));
            assert!(BUSINESS_SUFFIXES.contains(&suffix));
            assert_eq!(rec.services, SERVICES);
            assert!(rec.verified);
            assert_eq!(rec.city, "Miami");
        }
    }

    #[test]
    fn generated_length_stays_within_city_bounds() {
        let mut rng = StdRng::from_os_rng();
        for _ in 0..50 {
            let records = generate_installers(&mut rng, &CITIES, DEFAULT_PER_CITY);
            assert!((50..=100).contains(&records.len()), "{}", records.len());

            for city in CITIES {
                let n = records.iter().filter(|r| r.city == city.name).count();
                assert!((5..=10).contains(&n), "{}: {n}", city.name);
            }
        }
    }

    #[test]
    fn records_are_grouped_in_city_order() {
        let mut rng = StdRng::seed_from_u64(3);
        let records = generate_installers(&mut rng, &CITIES, DEFAULT_PER_CITY);

        let index_of = |name: &str| CITIES.iter().position(|c| c.name == name).unwrap();
        let order: Vec<usize> = records.iter().map(|r| index_of(&r.city)).collect();
        assert!(order.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(order.first(), Some(&0));
        assert_eq!(order.last(), Some(&9));
    }

    #[test]
    fn empty_city_table_generates_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_installers(&mut rng, &[], DEFAULT_PER_CITY).is_empty());
    }

    #[test]
    fn independent_runs_share_structure_not_values() {
        let mut a_rng = StdRng::seed_from_u64(100);
        let mut b_rng = StdRng::seed_from_u64(200);
        let a = generate_installers(&mut a_rng, &CITIES, DEFAULT_PER_CITY);
        let b = generate_installers(&mut b_rng, &CITIES, DEFAULT_PER_CITY);

        let cities = |v: &[InstallerRecord]| {
            let mut seen: Vec<String> = v.iter().map(|r| r.city.clone()).collect();
            seen.dedup();
            seen
        };
        assert_eq!(cities(&a), cities(&b));

        let phones_a: Vec<&str> = a.iter().map(|r| r.phone.as_str()).collect();
        let phones_b: Vec<&str> = b.iter().map(|r| r.phone.as_str()).collect();
        assert_ne!(phones_a, phones_b);
    }

    #[test]
    fn same_seed_reproduces_the_run() {
        let a = generate_installers(&mut StdRng::seed_from_u64(42), &CITIES, DEFAULT_PER_CITY);
        let b = generate_installers(&mut StdRng::seed_from_u64(42), &CITIES, DEFAULT_PER_CITY);
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn source_yields_every_city_without_errors() {
        let source = QplScrapeSource::new(CITIES.to_vec(), 1..=1, Duration::ZERO, Some(5)).unwrap();
        let items: Vec<_> = source.stream().await.collect().await;

        assert_eq!(items.len(), CITIES.len());
        for (item, city) in items.iter().zip(CITIES) {
            let env = item.as_ref().unwrap();
            assert_eq!(env.payload.city, city.name);
            assert_eq!(env.payload.zip_code, city.zip);
        }
    }

    #[tokio::test]
    async fn source_over_no_cities_is_empty() {
        let source = QplScrapeSource::new(Vec::new(), DEFAULT_PER_CITY, Duration::ZERO, None).unwrap();
        let items: Vec<_> = source.stream().await.collect().await;
        assert!(items.is_empty());
    }

    #[test]
    #[allow(clippy::reversed_empty_ranges)]
    fn inverted_per_city_range_is_rejected() {
        let res = QplScrapeSource::new(CITIES.to_vec(), 10..=5, Duration::ZERO, None);
        assert!(matches!(res, Err(PipelineError::Source(_))));

        assert!(QplScrapeSource::new(CITIES.to_vec(), 7..=7, Duration::ZERO, None).is_ok());
    }
}
