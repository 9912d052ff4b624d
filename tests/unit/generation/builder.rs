//! Tests for the gap-free instruction builder

#[cfg(test)]
mod tests {
    use knitgen::generation::builder::{PieceBuilder, ShapingKeys};
    use knitgen::math::shaping::plan_shaping;
    use knitgen::model::pattern::{Param, PatternPiece, PieceRole, RowUnit, Text, TextKey};

    // Tests rows are assigned sequentially and the cast-on becomes a note
    // Verified by starting the second instruction on the same row
    #[test]
    fn test_sequential_rows_and_cast_on_note() {
        let mut builder = PieceBuilder::new(PieceRole::Back, RowUnit::Rows);
        builder.cast_on(100);
        builder.ribbing(15, 4);
        builder.stockinette(20);
        let piece = builder.finish();

        assert_eq!(piece.cast_on_stitches, 100);
        assert_eq!(piece.total_rows, 35);
        assert!(piece.covers_all_rows());

        let first = piece.instructions.first().expect("ribbing instruction");
        assert_eq!((first.row_start, first.row_end), (1, 15));
        assert_eq!(first.text.key, TextKey::Ribbing);
        assert_eq!(
            first.note,
            Some(Text::new(TextKey::CastOn, vec![Param::Count(100)]))
        );
        let second = piece.instructions.get(1).expect("stockinette instruction");
        assert_eq!((second.row_start, second.row_end), (16, 35));
        assert!(second.note.is_none());
    }

    // Tests rounds use the in-the-round cast-on
    // Verified by always emitting a flat cast-on
    #[test]
    fn test_cast_on_in_round() {
        let mut builder = PieceBuilder::new(PieceRole::Body, RowUnit::Rounds);
        builder.cast_on(228);
        builder.ribbing(15, 4);
        let piece = builder.finish();

        let first = piece.instructions.first().expect("ribbing instruction");
        assert_eq!(first.note.as_ref().map(|note| note.key), Some(TextKey::CastOnInRound));
        assert_eq!(
            first.text.params.last(),
            Some(&Param::Unit(RowUnit::Rounds))
        );
    }

    // Tests cast-ons below the minimum are clamped with a warning
    // Verified by allowing a two-stitch cast-on
    #[test]
    fn test_cast_on_clamped() {
        let mut builder = PieceBuilder::new(PieceRole::Sleeve, RowUnit::Rows);
        builder.cast_on(2);
        assert_eq!(builder.stitches(), 4);
        let piece = builder.finish();

        assert_eq!(piece.warnings.len(), 1);
        assert_eq!(
            piece.warnings.first().map(|warning| warning.key),
            Some(TextKey::WarnClamped)
        );
    }

    // Tests short ribbing is raised to the minimum with a warning
    // Verified by keeping the requested row count
    #[test]
    fn test_short_ribbing_raised() {
        let mut builder = PieceBuilder::new(PieceRole::Sleeve, RowUnit::Rows);
        builder.cast_on(40);
        builder.ribbing(2, 4);
        let piece = builder.finish();

        assert_eq!(piece.total_rows, 4);
        assert_eq!(
            piece.warnings,
            vec![Text::new(
                TextKey::WarnShortRibbing,
                vec![Param::Count(2), Param::Count(4)]
            )]
        );
    }

    // Tests empty and negative spans emit nothing
    // Verified by emitting zero-length instructions
    #[test]
    fn test_non_positive_work_skipped() {
        let mut builder = PieceBuilder::new(PieceRole::Back, RowUnit::Rows);
        builder.cast_on(20);
        builder.stockinette(0);
        builder.stockinette(-5);
        assert_eq!(builder.row(), 0);
        builder.stockinette(3);
        let piece = builder.finish();

        assert_eq!(piece.instructions.len(), 1);
        assert!(piece.covers_all_rows());
    }

    // Tests shaping consumes the whole budget and lands on the target count
    // Verified by skipping the trailing straight rows
    #[test]
    fn test_shape_consumes_budget() {
        let mut builder = PieceBuilder::new(PieceRole::Sleeve, RowUnit::Rows);
        builder.cast_on(42);
        let plan = plan_shaping(42, 76, 100, 2);
        builder.shape(&plan, "sleeve", ShapingKeys::EDGES);

        assert_eq!(builder.stitches(), 76);
        assert_eq!(builder.row(), 100);
        let piece = builder.finish();
        assert!(piece.covers_all_rows());
        assert!(piece.warnings.is_empty());
        assert_eq!(piece.calculations.len(), 1);
        assert!(
            piece
                .instructions
                .iter()
                .any(|ins| ins.text.key == TextKey::Increase)
        );
    }

    // Tests compressed and immediate shaping raise warnings
    // Verified by silently compressing shaping
    #[test]
    fn test_shape_warnings() {
        let mut builder = PieceBuilder::new(PieceRole::Yoke, RowUnit::Rounds);
        builder.cast_on(100);
        builder.shape(&plan_shaping(100, 60, 4, 2), "raglan", ShapingKeys::RAGLAN);
        builder.shape(&plan_shaping(60, 50, 0, 2), "neck", ShapingKeys::EDGES);
        assert_eq!(builder.stitches(), 50);
        let piece = builder.finish();

        let keys: Vec<TextKey> = piece.warnings.iter().map(|warning| warning.key).collect();
        assert_eq!(keys, vec![TextKey::WarnEveryRowShaping, TextKey::WarnNoRoom]);
        assert!(
            piece
                .instructions
                .iter()
                .any(|ins| ins.text.key == TextKey::RaglanDecrease)
        );
        assert!(piece.covers_all_rows());
    }

    // Tests straight plans become plain stockinette
    // Verified by dropping rows of straight plans
    #[test]
    fn test_shape_straight_plan() {
        let mut builder = PieceBuilder::new(PieceRole::Back, RowUnit::Rows);
        builder.cast_on(114);
        builder.shape(&plan_shaping(114, 114, 105, 2), "waist", ShapingKeys::EDGES);
        let piece = builder.finish();

        assert_eq!(piece.total_rows, 105);
        assert_eq!(
            piece.instructions.first().map(|ins| ins.text.key),
            Some(TextKey::Stockinette)
        );
    }

    /// Every row count and shaping repeat matches the rows it spans
    fn assert_counts_match_spans(piece: &PatternPiece) {
        for ins in &piece.instructions {
            match (ins.text.key, ins.text.params.as_slice()) {
                (TextKey::Stockinette | TextKey::Ribbing, [Param::Count(rows), _]) => {
                    assert_eq!(*rows, i64::from(ins.rows()), "{ins:?}");
                }
                (
                    TextKey::Increase | TextKey::Decrease,
                    [Param::Count(_), Param::Count(interval), Param::Count(repeats), _],
                ) => {
                    assert_eq!(interval * repeats, i64::from(ins.rows()), "{ins:?}");
                }
                _ => {}
            }
        }
    }

    /// Stitches removed by decreases, counting single-row notes
    fn decreased(piece: &PatternPiece) -> i64 {
        piece
            .instructions
            .iter()
            .flat_map(|ins| std::iter::once(&ins.text).chain(ins.note.as_ref()))
            .filter(|text| text.key == TextKey::Decrease)
            .map(|text| match text.params.as_slice() {
                [Param::Count(delta), _, Param::Count(repeats), _] => delta * repeats,
                _ => 0,
            })
            .sum()
    }

    // Tests overlay splits an instruction around the inserted row
    // Verified by replacing the whole instruction
    #[test]
    fn test_overlay_splits_instruction() {
        let mut builder = PieceBuilder::new(PieceRole::RightFront, RowUnit::Rows);
        builder.cast_on(60);
        builder.stockinette(10);
        let hole = Text::new(TextKey::Buttonhole, vec![Param::Count(6)]);
        assert!(builder.overlay(4, hole.clone()));
        assert!(!builder.overlay(11, hole.clone()));
        let piece = builder.finish();

        assert_eq!(piece.instructions.len(), 3);
        assert!(piece.covers_all_rows());
        let inserted = piece.instruction_at(4).expect("row 4");
        assert_eq!(inserted.text, hole);
        assert_eq!(
            inserted.note,
            Some(Text::new(
                TextKey::Stockinette,
                vec![Param::Count(1), Param::Unit(RowUnit::Rows)]
            ))
        );
        assert_eq!(piece.instruction_at(3).map(|ins| ins.row_start), Some(1));
        assert_eq!(piece.instruction_at(5).map(|ins| ins.row_end), Some(10));
        assert_counts_match_spans(&piece);
    }

    // Tests overlay keeps the cast-on note on the first row
    // Verified by splitting the cast-on row off its note
    #[test]
    fn test_overlay_at_edges() {
        let mut builder = PieceBuilder::new(PieceRole::RightFront, RowUnit::Rows);
        builder.cast_on(60);
        builder.stockinette(5);
        let hole = Text::new(TextKey::Buttonhole, vec![Param::Count(6)]);
        assert!(builder.overlay(1, hole.clone()));
        assert!(builder.overlay(5, hole.clone()));
        let piece = builder.finish();

        assert_eq!(piece.instructions.len(), 4);
        assert!(piece.covers_all_rows());
        assert_eq!(
            piece.instruction_at(1).and_then(|ins| ins.note.as_ref()).map(|note| note.key),
            Some(TextKey::CastOn)
        );
        assert_eq!(piece.instruction_at(2).map(|ins| &ins.text), Some(&hole));
        assert_eq!(piece.instruction_at(5).map(|ins| &ins.text), Some(&hole));
        assert_counts_match_spans(&piece);
    }

    // Tests overlay fragments of ribbing and shaping keep consistent counts
    // Verified by copying the original parameters onto every fragment
    #[test]
    fn test_overlay_fragments_match_spans() {
        let mut builder = PieceBuilder::new(PieceRole::RightFront, RowUnit::Rows);
        builder.cast_on(60);
        builder.ribbing(15, 4);
        builder.shape(&plan_shaping(60, 46, 28, 2), "waist", ShapingKeys::EDGES);
        for row in [5, 22, 27] {
            assert!(builder.overlay(row, Text::new(TextKey::Buttonhole, vec![Param::Count(6)])));
        }
        assert_eq!(builder.stitches(), 46);
        let piece = builder.finish();

        assert!(piece.covers_all_rows());
        assert_counts_match_spans(&piece);
        assert_eq!(decreased(&piece), 14);

        let ribbing = piece.instruction_at(15).expect("row 15");
        assert_eq!((ribbing.row_start, ribbing.text.params.first()), (6, Some(&Param::Count(10))));
        assert_eq!(
            piece.instruction_at(22).and_then(|ins| ins.note.as_ref()).map(|note| note.key),
            Some(TextKey::Stockinette)
        );
        let on_event = piece.instruction_at(27).and_then(|ins| ins.note.as_ref());
        assert_eq!(on_event.map(|note| note.key), Some(TextKey::Decrease));
        let tail = piece.instruction_at(43).expect("row 43");
        assert_eq!((tail.row_start, tail.text.params.get(2)), (28, Some(&Param::Count(4))));
    }

    // Tests overlay moves past rows that cannot be split
    // Verified by splitting a bind-off row
    #[test]
    fn test_overlay_skips_fixed_rows() {
        let mut builder = PieceBuilder::new(PieceRole::RightFront, RowUnit::Rows);
        builder.cast_on(60);
        builder.stockinette(3);
        builder.change(2, Text::new(TextKey::ArmholeBindOff, vec![Param::Count(3)]), -6);
        builder.stockinette(2);
        let hole = Text::new(TextKey::Buttonhole, vec![Param::Count(6)]);
        assert!(builder.overlay(4, hole.clone()));
        assert!(builder.overlay(7, hole.clone()));
        assert!(!builder.overlay(6, hole.clone()));
        let piece = builder.finish();

        assert_eq!(
            piece.instruction_at(4).map(|ins| ins.text.key),
            Some(TextKey::ArmholeBindOff)
        );
        assert_eq!(piece.instruction_at(6).map(|ins| &ins.text), Some(&hole));
        assert_eq!(piece.instruction_at(7).map(|ins| &ins.text), Some(&hole));
        assert!(piece.covers_all_rows());
    }

    // Tests negative counts never reach an instruction
    // Verified by passing counts through unchanged
    #[test]
    fn test_negative_counts_clamped() {
        let mut builder = PieceBuilder::new(PieceRole::Front, RowUnit::Rows);
        builder.cast_on(20);
        builder.single(Text::new(TextKey::CenterBindOff, vec![Param::Count(-3)]), 0);
        let piece = builder.finish();

        assert_eq!(
            piece.instructions.first().map(|ins| &ins.text),
            Some(&Text::new(TextKey::CenterBindOff, vec![Param::Count(0)]))
        );
        assert_eq!(
            piece.warnings,
            vec![Text::new(
                TextKey::WarnClamped,
                vec![Param::Label("Front".to_string()), Param::Count(-3), Param::Count(0)]
            )]
        );
    }

    // Tests nothing is bound off once every stitch is gone
    // Verified by binding off zero stitches
    #[test]
    fn test_bind_off_without_stitches() {
        let mut builder = PieceBuilder::new(PieceRole::Back, RowUnit::Rows);
        builder.cast_on(8);
        builder.change(1, Text::new(TextKey::ShoulderStep, vec![Param::Count(4)]), -8);
        builder.bind_off_remaining();
        assert_eq!(builder.row(), 1);
    }

    // Tests binding off leaves no live stitches and quantity is kept
    // Verified by leaving stitches on the needle
    #[test]
    fn test_bind_off_and_quantity() {
        let mut builder = PieceBuilder::new(PieceRole::Sleeve, RowUnit::Rows).with_quantity(2);
        builder.cast_on(30);
        builder.change(2, Text::new(TextKey::ArmholeBindOff, vec![Param::Count(3)]), -6);
        builder.bind_off_remaining();
        assert_eq!(builder.stitches(), 0);
        let piece = builder.finish();

        assert_eq!(piece.quantity, 2);
        assert_eq!(piece.total_rows, 3);
        assert_eq!(
            piece.instructions.last().map(|ins| &ins.text),
            Some(&Text::new(TextKey::BindOffRemaining, vec![Param::Count(24)]))
        );
    }

    // Tests picked-up pieces start from the given key and stitch count
    // Verified by ignoring the pick-up note
    #[test]
    fn test_pick_up() {
        let mut builder = PieceBuilder::new(PieceRole::Hood, RowUnit::Rows);
        assert_eq!(builder.pick_up(98, TextKey::PickUpHood), 98);
        builder.stockinette(10);
        builder.set_unit(RowUnit::Rounds);
        assert_eq!(builder.unit(), RowUnit::Rounds);
        let piece = builder.finish();

        assert_eq!(piece.cast_on_stitches, 98);
        assert_eq!(
            piece.instructions.first().and_then(|ins| ins.note.as_ref()),
            Some(&Text::new(TextKey::PickUpHood, vec![Param::Count(98)]))
        );
    }

    // Tests the pick-up note carries the clamped count
    // Verified by writing the requested count into the note
    #[test]
    fn test_pick_up_clamped_note() {
        let mut builder = PieceBuilder::new(PieceRole::Yoke, RowUnit::Rounds);
        assert_eq!(builder.pick_up(-16, TextKey::JoinYoke), 4);
        builder.stockinette(2);
        let piece = builder.finish();

        assert_eq!(
            piece.instructions.first().and_then(|ins| ins.note.as_ref()),
            Some(&Text::new(TextKey::JoinYoke, vec![Param::Count(4)]))
        );
        assert_eq!(
            piece.warnings.first().map(|warning| warning.key),
            Some(TextKey::WarnClamped)
        );
    }
}
