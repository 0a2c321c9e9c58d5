//! Property-based tests for chatlens.
//!
//! Transcripts are assembled from predefined fragments so generation stays fast.

use proptest::prelude::*;

use chatlens::message::period_bucket;
use chatlens::parsing::Segmenter;
use chatlens::prelude::*;

/// One transcript line: (day, month, hour, minute, author, text)
type Line = (u32, u32, u32, u32, &'static str, &'static str);

fn arb_line() -> impl Strategy<Value = Line> {
    (
        1u32..=28,
        1u32..=12,
        0u32..24,
        0u32..60,
        prop::sample::select(vec!["Alice", "Bob", "Charlie", "Иван", "+1 555 0100"]),
        prop::sample::select(vec![
            "Hello",
            "meet at 10:30: ok?",
            "<Media omitted>",
            "This message was deleted",
            "",
            "🎉🔥 emoji",
            "line one\nline two",
            "quoting 1/1/23, 10:30 - inside",
        ]),
    )
}

fn arb_lines(max_len: usize) -> impl Strategy<Value = Vec<Line>> {
    prop::collection::vec(arb_line(), 0..max_len)
}

fn render(lines: &[Line]) -> String {
    lines
        .iter()
        .map(|(d, m, h, min, author, text)| format!("{d}/{m}/2023, {h}:{min:02} - {author}: {text}\n"))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================
    // PARSING PROPERTIES
    // ============================================

    /// Every rendered line becomes exactly one message, in order
    #[test]
    fn one_message_per_line(lines in arb_lines(30)) {
        let corpus = TranscriptParser::new().parse_str(&render(&lines)).into_corpus();

        prop_assert_eq!(corpus.len(), lines.len());
        for (msg, line) in corpus.iter().zip(&lines) {
            prop_assert_eq!(msg.author(), line.4);
            prop_assert_eq!(msg.text().trim_end_matches('\n'), line.5);
        }
    }

    /// Records never outnumber timestamp matches
    #[test]
    fn records_bounded_by_segments(raw in "[0-9/:, apm\\-\\[\\]A-Za-z\n]{0,200}") {
        let segments = Segmenter::new().segment(&raw).len();
        match TranscriptParser::new().parse_str(&raw) {
            ParseOutcome::EmptyCorpus => prop_assert_eq!(segments, 0),
            ParseOutcome::Parsed(parsed) => {
                prop_assert!(parsed.corpus.len() <= segments);
                prop_assert_eq!(parsed.report.segments(), segments);
            }
        }
    }

    /// Parsing is deterministic
    #[test]
    fn parsing_is_deterministic(lines in arb_lines(20)) {
        let raw = render(&lines);
        let parser = TranscriptParser::new();
        prop_assert_eq!(parser.parse_str(&raw), parser.parse_str(&raw));
    }

    /// Resolved timestamps keep the rendered wall-clock values
    #[test]
    fn time_fields_match_input(lines in arb_lines(20)) {
        let corpus = TranscriptParser::new().parse_str(&render(&lines)).into_corpus();

        for (msg, (d, m, h, min, _, _)) in corpus.iter().zip(&lines) {
            let time = msg.time().expect("24-hour day-first lines always resolve");
            prop_assert_eq!(time.day_of_month(), *d);
            prop_assert_eq!(time.month_num(), *m);
            prop_assert_eq!(time.hour(), *h);
            prop_assert_eq!(time.minute(), *min);
            prop_assert_eq!(time.period_bucket(), period_bucket(*h));
        }
    }

    // ============================================
    // CORPUS PROPERTIES
    // ============================================

    /// Author groups partition the corpus
    #[test]
    fn author_groups_partition(lines in arb_lines(30)) {
        let corpus = TranscriptParser::new().parse_str(&render(&lines)).into_corpus();
        let total: usize = corpus.by_author(true).values().map(Vec::len).sum();
        prop_assert_eq!(total, corpus.len());
    }

    /// Filtered views are ordered subsets of the corpus
    #[test]
    fn filter_yields_ordered_subset(lines in arb_lines(30), exclude_media in any::<bool>()) {
        let corpus = TranscriptParser::new().parse_str(&render(&lines)).into_corpus();
        let filter = CorpusFilter::new().with_author("alice").exclude_media(exclude_media);
        let view = corpus.filter(&filter);

        prop_assert!(view.len() <= corpus.len());
        prop_assert!(view.iter().all(|m| m.author() == "Alice"));

        let positions: Vec<usize> = view
            .iter()
            .map(|m| corpus.iter().position(|c| std::ptr::eq(c, m)).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}

proptest! {
    /// Every hour has its own period label
    #[test]
    fn period_bucket_is_injective(a in 0u32..24, b in 0u32..24) {
        prop_assume!(a != b);
        prop_assert_ne!(period_bucket(a), period_bucket(b));
    }
}
