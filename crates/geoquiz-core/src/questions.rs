//! Question generation.
//!
//! A question targets one country drawn uniformly from a pool. Multiple-choice
//! questions get three distinct distractors from the same pool, shuffled
//! together with the answer. Currency questions also keep the distractors'
//! currencies apart from the answer's, so no two options share a label.

use rand::distributions::Alphanumeric;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::instrument;

use crate::catalog::{self, Country};
use crate::error::GameError;
use crate::model::{Domain, Question, QuestionType};

/// Options shown for multiple-choice questions, answer included.
pub const OPTION_COUNT: usize = 4;

/// Generate one question of `kind` from `pool`.
///
/// The pool must hold at least [`OPTION_COUNT`] entries for the options to be
/// complete; the catalog guarantees this for every zone. `traps` uses the same
/// pool and is only recorded on the span.
#[instrument(level = "debug", skip(pool, rng), fields(pool = pool.len()))]
pub fn generate_question<R: Rng + ?Sized>(
    kind: QuestionType,
    pool: &[&'static Country],
    traps: bool,
    rng: &mut R,
) -> Result<Question, GameError> {
    let target = *pool.choose(rng).ok_or(GameError::EmptyPool)?;
    if kind.is_multiple_choice() {
        debug_assert!(pool.len() >= OPTION_COUNT, "pool too small for distractors");
    }
    Ok(make_question(kind, target, pool, rng))
}

/// Generate one question drawing from the countries of `zone`.
pub fn generate_for_zone<R: Rng + ?Sized>(
    kind: QuestionType,
    zone: Domain,
    traps: bool,
    rng: &mut R,
) -> Result<Question, GameError> {
    generate_question(kind, &catalog::pool(zone), traps, rng)
}

fn make_question<R: Rng + ?Sized>(
    kind: QuestionType,
    target: &'static Country,
    pool: &[&'static Country],
    rng: &mut R,
) -> Question {
    let suffix: String = (0..4)
        .map(|_| char::from(rng.sample(Alphanumeric)).to_ascii_lowercase())
        .collect();

    let mut question = Question {
        id: format!("{kind:?}-{}-{suffix}", target.iso),
        kind,
        prompt: String::new(),
        correct_iso: target.iso.to_string(),
        options: Vec::new(),
        statement: None,
        is_true_answer: None,
        display_values: Vec::new(),
        explanation: target.fact.to_string(),
        target_name: target.name.to_string(),
        target_capital: target.capital.to_string(),
        target_flag: target.flag.to_string(),
    };

    if kind.is_multiple_choice() {
        question.options = build_options(kind, target, pool, rng);
    }

    question.prompt = match kind {
        QuestionType::CapitalToCountry => {
            format!("À quel pays appartient la capitale {} ?", target.capital)
        }
        QuestionType::CountryToCapital => format!("Quelle est la capitale de {} ?", target.name),
        QuestionType::FlagToCountry => format!("Quel pays possède ce drapeau {} ?", target.flag),
        QuestionType::CountryToFlag => format!("Quel drapeau correspond à {} ?", target.name),
        QuestionType::MapClick => format!("Clique sur {} sur la carte.", target.name),
        QuestionType::TrueFalse => {
            let decoy = pool
                .iter()
                .filter(|c| c.iso != target.iso)
                .copied()
                .collect::<Vec<_>>()
                .choose(rng)
                .copied();
            let is_true = decoy.is_none() || rng.gen_bool(0.5);
            let capital = match decoy {
                Some(other) if !is_true => other.capital,
                _ => target.capital,
            };
            question.statement = Some(format!("La capitale de {} est {capital}.", target.name));
            question.is_true_answer = Some(is_true);
            "Vrai ou faux ?".to_string()
        }
        QuestionType::PopulationToCountry => format!(
            "Quel pays compte environ {} ?",
            describe_population(target.population)
        ),
        QuestionType::CountryToCurrency => {
            question.display_values = question
                .options
                .iter()
                .map(|iso| {
                    pool.iter()
                        .find(|c| c.iso == iso.as_str())
                        .map(|c| c.currency.to_string())
                        .unwrap_or_else(|| iso.clone())
                })
                .collect();
            format!("Quelle est la monnaie utilisée par {} ?", target.name)
        }
    };

    question
}

/// Three distinct distractors plus the answer, shuffled.
fn build_options<R: Rng + ?Sized>(
    kind: QuestionType,
    target: &Country,
    pool: &[&'static Country],
    rng: &mut R,
) -> Vec<String> {
    let mut candidates: Vec<&Country> = pool
        .iter()
        .filter(|c| c.iso != target.iso)
        .copied()
        .collect();

    let mut picked: Vec<&Country> = Vec::with_capacity(OPTION_COUNT - 1);
    if kind == QuestionType::CountryToCurrency {
        candidates.shuffle(rng);
        for &candidate in &candidates {
            if picked.len() == OPTION_COUNT - 1 {
                break;
            }
            let fresh = candidate.currency != target.currency
                && picked.iter().all(|p| p.currency != candidate.currency);
            if fresh {
                picked.push(candidate);
            }
        }
        if picked.len() < OPTION_COUNT - 1 {
            tracing::debug!("too few distinct currencies in pool, labels may repeat");
            picked.clear();
        }
    }
    if picked.is_empty() {
        picked = candidates
            .choose_multiple(rng, OPTION_COUNT - 1)
            .copied()
            .collect();
    }

    let mut options: Vec<String> = picked.iter().map(|c| c.iso.to_string()).collect();
    options.push(target.iso.to_string());
    options.shuffle(rng);
    options
}

/// Population phrase used in prompts.
fn describe_population(millions: f64) -> String {
    if millions >= 10.0 {
        format!("{} millions d'habitants", millions.round() as u64)
    } else if millions >= 1.0 {
        format!("{} millions d'habitants", format!("{millions:.1}").replace('.', ","))
    } else {
        let thousands = (millions * 1000.0).round().max(1.0) as u64;
        format!("{thousands} 000 habitants")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::model::{Choice, Continent};

    const ROUNDS: usize = 200;

    #[test]
    fn multiple_choice_options_are_unique_and_contain_answer_once() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool = catalog::pool(Domain::World);
        for kind in QuestionType::ALL.into_iter().filter(|k| k.is_multiple_choice()) {
            for _ in 0..ROUNDS {
                let q = generate_question(kind, &pool, false, &mut rng).unwrap();
                assert_eq!(q.options.len(), OPTION_COUNT, "{kind:?}");
                let unique: HashSet<_> = q.options.iter().collect();
                assert_eq!(unique.len(), OPTION_COUNT, "{kind:?}: {:?}", q.options);
                assert_eq!(
                    q.options.iter().filter(|o| **o == q.correct_iso).count(),
                    1
                );
                assert!(q.statement.is_none());
                assert!(q.is_true_answer.is_none());
            }
        }
    }

    #[test]
    fn map_click_has_no_options() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..ROUNDS {
            let q = generate_for_zone(QuestionType::MapClick, Domain::Europe, false, &mut rng)
                .unwrap();
            assert!(q.options.is_empty());
            assert!(q.prompt.contains(&q.target_name));
        }
    }

    #[test]
    fn true_false_states_target_or_decoy_capital() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut verdicts = HashSet::new();
        for _ in 0..ROUNDS {
            let q = generate_for_zone(QuestionType::TrueFalse, Domain::Asia, true, &mut rng)
                .unwrap();
            assert!(q.options.is_empty());
            let statement = q.statement.clone().unwrap();
            let truth = q.is_true_answer.unwrap();
            verdicts.insert(truth);
            assert_eq!(statement.ends_with(&format!("{}.", q.target_capital)), truth);
        }
        assert_eq!(verdicts.len(), 2, "coin flip should land both ways");
    }

    #[test]
    fn continent_pool_keeps_targets_and_options_on_the_continent() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..ROUNDS {
            let q = generate_for_zone(QuestionType::FlagToCountry, Domain::Oceania, false, &mut rng)
                .unwrap();
            for iso in &q.options {
                assert_eq!(catalog::find(iso).unwrap().continent, Continent::Oceania);
            }
        }
    }

    #[test]
    fn currency_labels_align_with_options() {
        let mut rng = StdRng::seed_from_u64(9);
        let q = generate_for_zone(QuestionType::CountryToCurrency, Domain::Americas, false, &mut rng)
            .unwrap();
        assert_eq!(q.display_values.len(), q.options.len());
        for (iso, label) in q.options.iter().zip(&q.display_values) {
            assert_eq!(catalog::find(iso).unwrap().currency, label.as_str());
        }
    }

    #[test]
    fn currency_options_never_share_a_label() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..ROUNDS {
            let q = generate_for_zone(QuestionType::CountryToCurrency, Domain::Europe, false, &mut rng)
                .unwrap();
            let unique: HashSet<_> = q.display_values.iter().collect();
            assert_eq!(unique.len(), OPTION_COUNT, "{:?}", q.display_values);

            let answer = catalog::find(&q.correct_iso).unwrap().currency;
            for (iso, label) in q.options.iter().zip(&q.display_values) {
                let chosen = Choice::Country(iso.clone());
                assert_eq!(q.is_correct(Some(&chosen)), label.as_str() == answer);
            }
        }
    }

    #[test]
    fn currency_options_fall_back_when_currencies_run_out() {
        let mut rng = StdRng::seed_from_u64(4);
        let pool: Vec<&'static Country> = ["FR", "DE", "ES", "IT", "PT"]
            .iter()
            .map(|iso| catalog::find(iso).unwrap())
            .collect();
        let q = generate_question(QuestionType::CountryToCurrency, &pool, false, &mut rng).unwrap();
        assert_eq!(q.options.len(), OPTION_COUNT);
        assert!(q.display_values.iter().all(|label| label == "Euro"));
    }

    #[test]
    fn small_pools_still_serve_questions_without_options() {
        let mut rng = StdRng::seed_from_u64(8);
        let pool: Vec<&'static Country> = ["FR", "GB"]
            .iter()
            .map(|iso| catalog::find(iso).unwrap())
            .collect();
        for _ in 0..20 {
            let map = generate_question(QuestionType::MapClick, &pool, false, &mut rng).unwrap();
            assert!(map.options.is_empty());
            let tf = generate_question(QuestionType::TrueFalse, &pool, false, &mut rng).unwrap();
            assert!(tf.statement.is_some());
        }
    }

    #[test]
    fn explanation_is_the_target_fact() {
        let mut rng = StdRng::seed_from_u64(1);
        let q = generate_for_zone(QuestionType::CountryToCapital, Domain::World, false, &mut rng)
            .unwrap();
        let target = catalog::find(&q.correct_iso).unwrap();
        assert_eq!(q.explanation, target.fact);
        assert_eq!(q.target_capital, target.capital);
        assert!(q.id.starts_with("CountryToCapital-"));
    }

    #[test]
    fn empty_pool_is_an_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = generate_question(QuestionType::MapClick, &[], false, &mut rng).unwrap_err();
        assert!(matches!(err, GameError::EmptyPool));
    }

    #[test]
    fn population_phrases() {
        assert_eq!(describe_population(68.2), "68 millions d'habitants");
        assert_eq!(describe_population(5.26), "5,3 millions d'habitants");
        assert_eq!(describe_population(0.9), "900 000 habitants");
        assert_eq!(describe_population(0.001), "1 000 habitants");
    }
}
