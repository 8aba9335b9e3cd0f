//! The `geoquiz practice` command.

use anyhow::Result;

use geoquiz_core::practice::{PracticeSession, Theme};

use super::{parse_answer, parse_domain, print_feedback, print_question, rng, GlobalArgs, Input, Line};

pub async fn execute(
    global: &GlobalArgs,
    theme: String,
    zone: Option<String>,
    count: u32,
    seed: Option<u64>,
) -> Result<()> {
    let config = global.load_config()?;
    let theme = theme.parse::<Theme>().map_err(anyhow::Error::msg)?;
    let zone = parse_domain(zone.as_deref(), &config)?;
    let mut rng = rng(seed);
    let mut input = Input::stdin();
    let mut session = PracticeSession::new(theme, zone);

    println!("Mode libre · {theme} · {zone}");
    if count == 0 {
        println!("Questions illimitées, entrée vide ou Ctrl-D pour arrêter.");
    }

    while count == 0 || session.asked() < count {
        let position = session.asked() as usize;
        let question = session.next_question(&mut rng)?.clone();
        print_question(&question, position, (count > 0).then_some(count as usize));

        match input.read(None).await? {
            Line::Text(text) if !(count == 0 && text.is_empty()) => {
                let feedback = session.answer(parse_answer(&question, &text))?;
                print_feedback(&feedback);
            }
            _ => break,
        }
    }

    println!(
        "\nBonnes réponses : {}/{} ({:.0}%)",
        session.correct(),
        session.asked(),
        session.accuracy() * 100.0
    );
    Ok(())
}
