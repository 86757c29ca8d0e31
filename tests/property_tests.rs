//! Property-based tests for animator and layout invariants.
//!
//! Tests validate:
//! 1. Scramble lock-in is monotone within a cycle and keeps the target's width
//! 2. Sequential reveal completes blocks strictly in order
//! 3. Typing output never starts before the input is complete
//! 4. Wrapped lines never exceed the requested width
//! 5. Glow intensity stays in [0, 1]

use proptest::prelude::*;
use splashfx::anim::scramble::locked_count;
use splashfx::anim::{
    DelayRange, ScrambleText, ScrambleTimings, SequentialReveal, SequentialTimings,
    TypingSimulation, TypingTimings,
};
use splashfx::model::PointerPosition;
use splashfx::schedule::Simulation;
use splashfx::view::glow::glow_intensity;
use splashfx::view::wrap::{display_width, wrap_lines, wrap_text};
use std::time::Duration;

fn text_strategy() -> impl Strategy<Value = String> {
    "[a-z 中文日本語！]{0,24}"
}

// ===== Property 1: Scramble =====

proptest! {
    #[test]
    fn locked_count_is_monotone_and_bounded(
        a in 0u64..10_000,
        b in 0u64..10_000,
        reveal in 1u64..8_000,
        len in 0usize..64,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let reveal = Duration::from_millis(reveal);
        let at_lo = locked_count(Duration::from_millis(lo), reveal, len);
        let at_hi = locked_count(Duration::from_millis(hi), reveal, len);
        prop_assert!(at_lo <= at_hi);
        prop_assert!(at_hi <= len);
        prop_assert_eq!(locked_count(reveal, reveal, len), len);
    }

    #[test]
    fn scramble_display_keeps_target_width(
        target in text_strategy(),
        until in 0u64..20_000,
        seed in any::<u64>(),
    ) {
        let mut sim = Simulation::new(seed);
        let mut task = sim.mount("scramble", ScrambleText::new(target.clone(), ScrambleTimings::default()));
        let mut ok = true;
        sim.run_until(&mut task, Duration::from_millis(until), |_, scramble| {
            ok &= display_width(scramble.display()) == display_width(&target);
            ok &= scramble.display().chars().count() == target.chars().count();
        });
        prop_assert!(ok);
    }

    #[test]
    fn locked_positions_show_the_target(
        target in text_strategy(),
        until in 0u64..8_000,
        seed in any::<u64>(),
    ) {
        let mut sim = Simulation::new(seed);
        let mut task = sim.mount("scramble", ScrambleText::new(target.clone(), ScrambleTimings::default()));
        sim.advance_to(&mut task, Duration::from_millis(until));
        let scramble = task.animator();
        for (i, (shown, real)) in scramble.display().chars().zip(target.chars()).enumerate() {
            if scramble.is_locked(i) {
                prop_assert_eq!(shown, real);
            }
        }
    }
}

// ===== Property 2: Sequential reveal =====

proptest! {
    #[test]
    fn blocks_reveal_in_order(
        blocks in prop::collection::vec(text_strategy(), 0..5),
        until in 0u64..30_000,
    ) {
        let lens: Vec<usize> = blocks.iter().map(|b| b.chars().count()).collect();
        let mut sim = Simulation::new(0);
        let mut task = sim.mount("sequential", SequentialReveal::new(blocks, SequentialTimings::default()));
        let mut ok = true;
        sim.run_until(&mut task, Duration::from_millis(until), |_, reveal| {
            let counts = reveal.visible_counts();
            for (i, &count) in counts.iter().enumerate() {
                ok &= count <= lens[i];
                // a later block only shows text once every earlier block is complete
                if count > 0 {
                    ok &= counts[..i].iter().zip(&lens).all(|(c, l)| c == l);
                }
            }
        });
        prop_assert!(ok);
    }
}

// ===== Property 3: Typing simulation =====

proptest! {
    #[test]
    fn output_waits_for_complete_input(
        input in text_strategy(),
        output in text_strategy(),
        min in 1u64..100,
        spread in 0u64..100,
        until in 0u64..20_000,
        seed in any::<u64>(),
    ) {
        let timings = TypingTimings {
            input_delay: DelayRange::from_millis(min, min + spread),
            ..TypingTimings::default()
        };
        let mut sim = Simulation::new(seed);
        let mut task = sim.mount("typing", TypingSimulation::new(input.clone(), output.clone(), timings));
        let mut ok = true;
        sim.run_until(&mut task, Duration::from_millis(until), |_, typing| {
            ok &= input.starts_with(typing.input_text());
            ok &= output.starts_with(typing.output_text());
            if !typing.output_text().is_empty() {
                ok &= typing.input_text() == input;
            }
        });
        prop_assert!(ok);
    }
}

// ===== Property 4: Wrapping =====

proptest! {
    #[test]
    fn wrapped_lines_fit(text in "[a-z 中文]{0,80}", width in 2u16..40) {
        for line in wrap_text(&text, width) {
            prop_assert!(display_width(&line) <= width, "{:?} wider than {}", line, width);
        }
    }

    #[test]
    fn wrapping_keeps_every_non_space_char(text in "[a-z 中文]{0,80}", width in 2u16..40) {
        let original: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let wrapped: String = wrap_text(&text, width)
            .concat()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        prop_assert_eq!(wrapped, original);
    }

    #[test]
    fn wrapped_line_offsets_point_into_source(text in "[a-z 中文]{0,80}", width in 2u16..40) {
        let chars: Vec<char> = text.chars().collect();
        let mut previous_end = 0;
        for line in wrap_lines(&text, width) {
            let len = line.text.chars().count();
            prop_assert!(line.start >= previous_end);
            let source: String = chars[line.start..line.start + len].iter().collect();
            prop_assert_eq!(&source, &line.text);
            previous_end = line.start + len;
        }
    }
}

// ===== Property 5: Glow intensity =====

proptest! {
    #[test]
    fn glow_intensity_is_a_unit_fraction(
        x in -200.0f32..200.0,
        y in -200.0f32..200.0,
        px in -200.0f32..200.0,
        py in -200.0f32..200.0,
        radius in 0.5f32..40.0,
    ) {
        let t = glow_intensity(x, y, PointerPosition::new(px, py), radius);
        prop_assert!((0.0..=1.0).contains(&t));
    }
}
