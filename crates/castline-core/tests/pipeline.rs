use castline_core::catalog::{prepare_cast, prepare_dialogue};
use castline_core::dataset;
use castline_core::merge::merge;
use castline_core::models::{CastRecord, DialogueLine, RawCast, RawDialogue};
use castline_core::resolve::resolve;

fn raw_line(character: &str, utterance: &str) -> RawDialogue {
    RawDialogue {
        character: character.into(),
        title: "The Big Lebowski".into(),
        year: "1998".into(),
        utterance: utterance.into(),
    }
}

fn raw_credit(character: &str, performer: &str) -> RawCast {
    RawCast {
        character: character.into(),
        performer: performer.into(),
        title: "The Big Lebowski".into(),
        year: "1998".into(),
    }
}

fn fixture() -> (Vec<DialogueLine>, Vec<CastRecord>) {
    let dialogue = prepare_dialogue(vec![
        raw_line("Dude", "The Dude abides."),
        raw_line("Walter", "Am I wrong?"),
        raw_line("Donny", "I am the walrus."),
        raw_line("Lebowski", "Condolences!"),
        raw_line("The Stranger", "Sometimes you eat the bar."),
        raw_line("Maude", "Does the female form make you uncomfortable?"),
        raw_line("Walter", "Shomer shabbos!"),
    ]);
    let cast = prepare_cast(vec![
        raw_credit("The Dude", "Jeff Bridges"),
        raw_credit("Dude", "Jeff Bridges"),
        raw_credit("Walter Sobchak", "John Goodman"),
        raw_credit("Donny", "Steve Buscemi"),
        // Three credits share the surname.
        raw_credit("Jeffrey Lebowski", "Jeff Bridges"),
        raw_credit("Mr. Lebowski", "David Huddleston"),
        raw_credit("Maude Lebowski", "Julianne Moore"),
    ]);
    (dialogue, cast)
}

#[test]
fn every_merged_line_resolves_once() {
    let (dialogue, cast) = fixture();
    let outcome = merge(&dialogue, &cast);
    let resolved = resolve(&outcome.candidates);

    let mut merged_ids: Vec<u64> = outcome.candidates.iter().map(|c| c.line_id).collect();
    merged_ids.sort_unstable();
    merged_ids.dedup();
    let mut resolved_ids: Vec<u64> = resolved.iter().map(|r| r.line_id).collect();
    resolved_ids.sort_unstable();

    assert_eq!(merged_ids, resolved_ids);
    // "The Stranger" has no credit.
    assert_eq!(resolved_ids, vec![0, 1, 2, 3, 5, 6]);
}

#[test]
fn earlier_variant_beats_shared_surname() {
    let (dialogue, cast) = fixture();
    let resolved = resolve(&merge(&dialogue, &cast).candidates);

    // With the honorific stripped, "LEBOWSKI" is the first name of David
    // Huddleston's credit, so the first-name pass settles the line before
    // the last-name pass can see the two other Lebowskis.
    let lebowski = resolved.iter().find(|r| r.line_id == 3).unwrap();
    assert_eq!(lebowski.performer, "DAVID HUDDLESTON");

    let maude = resolved.iter().find(|r| r.line_id == 5).unwrap();
    assert_eq!(maude.performer, "JULIANNE MOORE");
}

#[test]
fn conflict_resolved_by_line_count() {
    let mut dialogue = prepare_dialogue(vec![raw_line("X", "Which one said this?")]);
    let mut cast = vec![
        CastRecord::from_character("X", "A", "THE BIG LEBOWSKI", 1998),
        CastRecord::from_character("X", "B", "THE BIG LEBOWSKI", 1998),
    ];
    for (performer, n) in [("A", 10), ("B", 3)] {
        let character = format!("ROLE {performer}");
        cast.push(CastRecord::from_character(
            character.as_str(),
            performer,
            "THE BIG LEBOWSKI",
            1998,
        ));
        for _ in 0..n {
            dialogue.push(DialogueLine {
                line_id: dialogue.len() as u64,
                character_raw: character.clone(),
                title: "THE BIG LEBOWSKI".into(),
                year: 1998,
                utterance: "filler".into(),
            });
        }
    }

    let outcome = merge(&dialogue, &cast);
    assert_eq!(outcome.candidates.iter().filter(|c| c.line_id == 0).count(), 2);

    let resolved = resolve(&outcome.candidates);
    assert_eq!(resolved.len(), 14);
    let line = resolved.iter().find(|r| r.line_id == 0).unwrap();
    assert_eq!(line.performer, "A");
}

#[test]
fn raw_match_is_never_overwritten() {
    let dialogue = prepare_dialogue(vec![raw_line("Jesus", "Nobody messes with the Jesus.")]);
    let cast = prepare_cast(vec![
        raw_credit("Jesus Quintana", "Someone Else"),
        raw_credit("Jesus", "John Turturro"),
    ]);
    let outcome = merge(&dialogue, &cast);
    assert_eq!(outcome.candidates.len(), 1);
    assert_eq!(outcome.candidates[0].performer, "JOHN TURTURRO");
}

#[test]
fn resolution_is_reproducible() {
    let (dialogue, cast) = fixture();
    let candidates = merge(&dialogue, &cast).candidates;
    assert_eq!(resolve(&candidates), resolve(&candidates));
}

#[test]
fn persisted_dataset_substitutes_for_recompute() {
    let (dialogue, cast) = fixture();
    let resolved = resolve(&merge(&dialogue, &cast).candidates);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("principal_lines.tsv");
    dataset::save(&resolved, &path).unwrap();
    assert_eq!(dataset::load(&path).unwrap().unwrap(), resolved);
}
