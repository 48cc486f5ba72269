//! End-to-end batch run against mock collaborators: a 12-contact batch
//! with two malformed profile URLs and one unreachable website, checking
//! checkpoint cadence, result ordering, and degraded-row handling.

use std::time::Duration;

use enrichment::testing::{MockProfileFetcher, MockScorer, MockTextFetcher, RecordingCheckpoint};
use enrichment::{
    top_leads, BatchConfig, BatchRunner, ContactRecord, LeadScore, Profile, RecordEnricher,
};

fn contact(n: usize, profile_url: &str) -> ContactRecord {
    ContactRecord {
        first_name: format!("First{n}"),
        last_name: format!("Last{n}"),
        email: format!("contact{n}@company{n}.test"),
        website: format!("https://company{n}.test"),
        title: "VP of Engineering".to_string(),
        profile_url: profile_url.to_string(),
    }
}

fn response(n: usize, score: u8, reasoning: &str) -> LeadScore {
    LeadScore {
        reasoning: reasoning.to_string(),
        score,
        data_message: format!("data {n}"),
        sentiment_message: format!("sentiment {n}"),
        connection_message: format!("connection {n}"),
    }
}

#[tokio::test]
async fn twelve_contact_batch_checkpoints_and_degrades_correctly() {
    // Rows 4 and 9 carry malformed profile URLs. Row 7's website is
    // unreachable (no page registered), so its content is empty.
    let contacts: Vec<ContactRecord> = (1..=12)
        .map(|n| {
            let url = if n == 4 || n == 9 {
                format!("https://company{n}.test/about")
            } else {
                format!("https://linkedin.com/in/contact{n}")
            };
            contact(n, &url)
        })
        .collect();

    let mut text_fetcher = MockTextFetcher::new();
    for n in 1..=12 {
        if n == 7 {
            continue;
        }
        text_fetcher = text_fetcher.with_page(
            format!("https://company{n}.test"),
            format!("Company {n} builds developer tooling."),
        );
    }

    let mut profile_fetcher = MockProfileFetcher::new();
    for n in 1..=12 {
        profile_fetcher = profile_fetcher.with_profile(
            format!("contact{n}"),
            Profile {
                title: Some("VP of Engineering".to_string()),
                company: Some(format!("Company {n}")),
                ..Default::default()
            },
        );
    }

    // Per-contact scores, keyed off the email embedded in the system
    // prompt. Row 7 saw empty website content, so the model pins it to 0.
    let scores = [
        (1, 2),
        (2, 5),
        (3, 1),
        (5, 4),
        (6, 3),
        (8, 5),
        (10, 2),
        (11, 4),
        (12, 1),
    ];
    let mut scorer = MockScorer::new().with_response_for(
        "contact7@company7.test",
        response(7, 0, "Website content was empty, so the score is 0."),
    );
    for (n, score) in scores {
        scorer = scorer.with_response_for(
            format!("contact{n}@company{n}.test"),
            response(n, score, "fit"),
        );
    }

    let checkpoint = RecordingCheckpoint::new();
    let runner = BatchRunner::new(
        RecordEnricher::new(text_fetcher, profile_fetcher, scorer.clone()),
        checkpoint.clone(),
        BatchConfig::new()
            .with_checkpoint_every(10)
            .with_pacing(Duration::ZERO),
    );

    let results = runner.run(&contacts, "We sell observability tooling.").await.unwrap();

    // One result per contact, in input order.
    assert_eq!(results.len(), 12);
    for (n, row) in (1..=12).zip(results.iter()) {
        assert_eq!(row.contact.first_name, format!("First{n}"));
        assert_eq!(row.result.name, format!("First{n} Last{n}"));
    }

    // Checkpoints at row 10 and at the final row, full snapshots each time.
    assert_eq!(checkpoint.writes(), 2);
    assert_eq!(checkpoint.snapshot_sizes(), vec![10, 12]);
    assert_eq!(checkpoint.latest().len(), 12);

    // Malformed profile URLs never reach the scorer.
    assert_eq!(scorer.call_count(), 10);
    for n in [4, 9] {
        let row = &results[n - 1];
        assert_eq!(row.result.score, 0);
        assert!(row.result.reasoning.to_lowercase().contains("invalid"));
        assert!(row.result.data_message.is_empty());
    }

    // The unreachable-website row was scored, not skipped.
    let row7 = &results[6];
    assert_eq!(row7.result.score, 0);
    assert!(row7.result.reasoning.contains("empty"));

    // Scored rows carry the model's fields through unchanged.
    let row2 = &results[1];
    assert_eq!(row2.result.score, 5);
    assert_eq!(row2.result.data_message, "data 2");

    // Top five: the two 5s first (input order on ties), then 4s, then a 3.
    let top = top_leads(&results, 5);
    let ranked: Vec<(&str, u8)> = top
        .iter()
        .map(|s| (s.result.name.as_str(), s.result.score))
        .collect();
    assert_eq!(
        ranked,
        vec![
            ("First2 Last2", 5),
            ("First8 Last8", 5),
            ("First5 Last5", 4),
            ("First11 Last11", 4),
            ("First6 Last6", 3),
        ]
    );
}

#[tokio::test]
async fn provider_failure_mid_batch_does_not_abort() {
    let contacts = vec![
        contact(1, "https://linkedin.com/in/contact1"),
        contact(2, "https://linkedin.com/in/contact2"),
    ];

    let text_fetcher = MockTextFetcher::new()
        .with_page("https://company1.test", "text")
        .with_page("https://company2.test", "text");

    let runner = BatchRunner::new(
        RecordEnricher::new(text_fetcher, MockProfileFetcher::new(), MockScorer::new().failing()),
        RecordingCheckpoint::new(),
        BatchConfig::new().with_pacing(Duration::ZERO),
    );

    let results = runner.run(&contacts, "ctx").await.unwrap();

    assert_eq!(results.len(), 2);
    for row in &results {
        assert_eq!(row.result.score, 0);
        assert!(row.result.reasoning.starts_with("Error:"));
    }
}
