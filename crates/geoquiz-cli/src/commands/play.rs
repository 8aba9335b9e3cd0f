//! The `geoquiz play` command.

use std::time::{Duration, Instant};

use anyhow::Result;

use geoquiz_core::levels::QUESTIONS_PER_LEVEL;
use geoquiz_core::progress::PASS_SCORE;
use geoquiz_core::session::LevelSession;

use super::{open_game, parse_answer, parse_domain, print_feedback, print_question, rng, GlobalArgs, Input, Line};

pub async fn execute(
    global: &GlobalArgs,
    domain: Option<String>,
    level: u8,
    seed: Option<u64>,
) -> Result<()> {
    let config = global.load_config()?;
    let domain = parse_domain(domain.as_deref(), &config)?;
    let mut input = Input::stdin();
    let mut game = open_game(global, &config, &mut input).await?;
    let mut rng = rng(seed);

    let mut session = game.start_level(domain, level, &mut rng)?;
    let level_config = *session.config();
    println!("{} · Niveau {} : {}", domain, level_config.id, level_config.title);
    println!("{}", level_config.description);

    if !run_attempt(&mut session, &mut input).await? {
        println!("\nEntrée fermée, tentative abandonnée.");
        return Ok(());
    }

    let score = session.score();
    let progress = game.finish_level(session)?.clone();
    println!("\nScore : {score}/{QUESTIONS_PER_LEVEL}");
    println!("Meilleur score : {}/{QUESTIONS_PER_LEVEL}", progress.best_score);
    if score >= PASS_SCORE {
        match game.progress().get(domain, level.saturating_add(1)) {
            Some(next) if next.unlocked => println!("Niveau {} débloqué !", next.level_id),
            _ => println!("Niveau réussi !"),
        }
    } else {
        println!("Il faut {PASS_SCORE}/{QUESTIONS_PER_LEVEL} pour débloquer le niveau suivant.");
    }
    println!(
        "Score total : {} · Rang : {}",
        game.progress().total_score(),
        game.rank()
    );

    game.flush().await;
    Ok(())
}

/// Ask every question of `session`. Returns `false` when input closes before
/// the last answer.
async fn run_attempt(session: &mut LevelSession, input: &mut Input) -> Result<bool> {
    while let Some(question) = session.current_question() {
        print_question(question, session.position(), Some(QUESTIONS_PER_LEVEL));
        let limit = session.remaining_secs().map(|s| Duration::from_secs(u64::from(s)));
        if let Some(limit) = limit {
            println!("  ⏱ {}s", limit.as_secs());
        }

        let started = Instant::now();
        let feedback = match input.read(limit).await? {
            Line::Text(text) => {
                let choice = parse_answer(question, &text);
                tracing::debug!("answered in {}ms", started.elapsed().as_millis());
                session.answer(choice)?
            }
            Line::TimedOut => session.expire()?,
            Line::Closed => return Ok(false),
        };
        print_feedback(&feedback);
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tokio::sync::mpsc;

    use super::*;
    use geoquiz_core::levels::{generate_level_questions, level_config};
    use geoquiz_core::map::MapStatus;
    use geoquiz_core::model::Domain;

    fn timed_session(seed: u64) -> LevelSession {
        let mut rng = StdRng::seed_from_u64(seed);
        let config = level_config(Domain::Europe, 3).unwrap();
        assert_eq!(config.timer_secs, Some(15));
        let questions = generate_level_questions(3, Domain::Europe, &mut rng).unwrap();
        LevelSession::with_questions(config, questions)
    }

    #[tokio::test(start_paused = true)]
    async fn silent_player_runs_out_the_clock() {
        let mut session = timed_session(6);
        let (tx, rx) = mpsc::unbounded_channel();
        let mut input = Input { lines: rx };

        let finished = run_attempt(&mut session, &mut input).await.unwrap();
        drop(tx);

        assert!(finished);
        assert!(session.is_finished());
        assert_eq!(session.score(), 0);
        assert_eq!(session.map_states().count(MapStatus::Correct), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn answers_and_timeouts_mix() {
        let mut session = timed_session(12);
        let first = session.current_question().unwrap().clone();
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(Ok(first.correct_iso.clone())).unwrap();
        let mut input = Input { lines: rx };

        let finished = run_attempt(&mut session, &mut input).await.unwrap();
        drop(tx);

        assert!(finished);
        let expected = u8::from(first.is_correct(parse_answer(&first, &first.correct_iso).as_ref()));
        assert_eq!(session.score(), expected);
    }

    #[tokio::test]
    async fn closed_input_stops_the_attempt() {
        let mut session = timed_session(1);
        let (tx, rx) = mpsc::unbounded_channel::<std::io::Result<String>>();
        drop(tx);
        let mut input = Input { lines: rx };

        assert!(!run_attempt(&mut session, &mut input).await.unwrap());
        assert!(!session.is_finished());
        assert_eq!(session.position(), 0);
    }
}
