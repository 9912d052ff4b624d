//! Tests for the seamless body, raglan yoke and sleeves in the round

#[cfg(test)]
mod tests {
    use crate::support::{Fixture, analysis};
    use knitgen::generation::builder::PieceBuilder;
    use knitgen::generation::seamless::{Direction, YokeLayout, body, sleeve, yoke};
    use knitgen::generation::sizing::{BodyDims, SleeveDims};
    use knitgen::model::garment::{
        Closure, ConstructionMethod, GarmentType, NecklineType, SleeveStyle,
    };
    use knitgen::model::pattern::{Param, PatternPiece, PieceRole, RowUnit, Text, TextKey};

    fn raglan(construction: ConstructionMethod, neckline: NecklineType) -> Fixture {
        Fixture::new(&analysis(
            GarmentType::Pullover,
            construction,
            neckline,
            SleeveStyle::Raglan,
        ))
    }

    fn keys(piece: &PatternPiece) -> Vec<TextKey> {
        piece.instructions.iter().map(|ins| ins.text.key).collect()
    }

    // Tests the body tube casts on the rib-aligned chest circumference
    // Verified by casting on the unrounded stitch count
    #[test]
    fn test_body_cast_on_rounded() {
        let f = raglan(ConstructionMethod::BottomUp, NecklineType::Crew);
        let piece = body(&f.ctx(), Direction::BottomUp).expect("body");

        assert_eq!(piece.cast_on_stitches, 228);
        assert_eq!(piece.cast_on_stitches % 4, 0);
        assert!(
            piece
                .calculations
                .iter()
                .any(|step| step.rounded_result == 228 && step.rounding_note.is_some())
        );
        assert_eq!(keys(&piece).last(), Some(&TextKey::HoldUnderarms));
        assert!(piece.covers_all_rows());
    }

    // Tests the top-down body starts from the yoke and ends in ribbing
    // Verified by casting on at the hem
    #[test]
    fn test_body_top_down() {
        let f = raglan(ConstructionMethod::TopDown, NecklineType::Crew);
        let piece = body(&f.ctx(), Direction::TopDown).expect("body");

        let keys = keys(&piece);
        assert_eq!(keys.last(), Some(&TextKey::BindOffRemaining));
        assert!(keys.contains(&TextKey::Ribbing));
        assert_eq!(
            piece.instructions.first().and_then(|ins| ins.note.as_ref()).map(|n| n.key),
            Some(TextKey::ResumeHeld)
        );
    }

    // Tests cardigan bodies are worked flat with buttonholes
    // Verified by working cardigan bodies in the round
    #[test]
    fn test_cardigan_body_buttonholes() {
        let mut analysis = analysis(
            GarmentType::Cardigan,
            ConstructionMethod::BottomUp,
            NecklineType::Crew,
            SleeveStyle::Raglan,
        );
        analysis.closure = Closure::Buttons { count: Some(5) };
        let f = Fixture::new(&analysis);
        let piece = body(&f.ctx(), Direction::BottomUp).expect("body");

        let holes = keys(&piece)
            .into_iter()
            .filter(|key| *key == TextKey::Buttonhole)
            .count();
        assert_eq!(holes, 5);
        assert!(piece.covers_all_rows());
    }

    // Tests the yoke layout for the reference measurements
    // Verified by leaving the held underarm stitches on the sleeves
    #[test]
    fn test_yoke_layout() {
        let f = raglan(ConstructionMethod::TopDown, NecklineType::Crew);
        let dims = BodyDims::derive(&f.ctx()).expect("valid measurements");
        let sleeve = SleeveDims::derive(&f.ctx()).expect("valid measurements");
        let mut builder = PieceBuilder::new(PieceRole::Yoke, RowUnit::Rounds);
        let layout = YokeLayout::derive(&f.ctx(), &dims, &sleeve, &mut builder);

        assert!(builder.finish().warnings.is_empty());
        assert_eq!(layout.back, 102);
        assert_eq!(layout.front, 102);
        assert_eq!(layout.sleeve, 64);
        assert_eq!(layout.events, 28);
        assert_eq!(layout.start(), 332);
        assert_eq!(layout.end(), 108);
        assert_eq!(layout.front_top(), 46);
    }

    // Tests a yoke whose underarms outgrow the body and sleeves keeps workable counts
    // Verified by subtracting the underarms unclamped
    #[test]
    fn test_yoke_layout_clamped() {
        let f = raglan(ConstructionMethod::BottomUp, NecklineType::Crew);
        let mut dims = BodyDims::derive(&f.ctx()).expect("valid measurements");
        dims.underarm_sts = 500;
        let sleeve = SleeveDims::derive(&f.ctx()).expect("valid measurements");
        let mut builder = PieceBuilder::new(PieceRole::Yoke, RowUnit::Rounds);
        let layout = YokeLayout::derive(&f.ctx(), &dims, &sleeve, &mut builder);

        assert_eq!((layout.back, layout.front, layout.sleeve), (4, 4, 4));
        assert_eq!(layout.events, 0);
        assert_eq!(layout.start(), 16);
        let warnings = builder.finish().warnings;
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|warning| warning.key == TextKey::WarnClamped));
    }

    // Tests top-down raglan increases add 8 stitches per round
    // Verified by increasing at only two raglan lines
    #[test]
    fn test_top_down_yoke_increases() {
        let f = raglan(ConstructionMethod::TopDown, NecklineType::Crew);
        let piece = yoke(&f.ctx(), Direction::TopDown).expect("yoke");

        let increases: Vec<_> = piece
            .instructions
            .iter()
            .filter(|ins| ins.text.key == TextKey::RaglanIncrease)
            .collect();
        assert!(!increases.is_empty());
        assert!(
            increases
                .iter()
                .all(|ins| ins.text.params.first() == Some(&Param::Count(8)))
        );
        assert_eq!(keys(&piece).last(), Some(&TextKey::SeparateYoke));
        assert!(piece.covers_all_rows());
    }

    // Tests the bottom-up yoke joins body and sleeves and decreases to the neck
    // Verified by skipping the join row
    #[test]
    fn test_bottom_up_yoke() {
        let f = raglan(ConstructionMethod::BottomUp, NecklineType::Crew);
        let piece = yoke(&f.ctx(), Direction::BottomUp).expect("yoke");

        let keys = keys(&piece);
        assert_eq!(keys.first(), Some(&TextKey::RaglanMarkers));
        assert_eq!(
            piece.instructions.first().and_then(|ins| ins.note.as_ref()),
            Some(&Text::new(TextKey::JoinYoke, vec![Param::Count(332)]))
        );
        assert!(keys.contains(&TextKey::RaglanDecrease));
        assert_eq!(keys.last(), Some(&TextKey::BindOffRemaining));
        assert_eq!(piece.cast_on_stitches, 332);
    }

    // Tests an unshaped neck gets a neckband on the yoke
    // Verified by leaving boat yokes without a band
    #[test]
    fn test_boat_yoke_neckband() {
        let f = raglan(ConstructionMethod::BottomUp, NecklineType::Boat);
        let piece = yoke(&f.ctx(), Direction::BottomUp).expect("yoke");
        assert!(keys(&piece).contains(&TextKey::Neckband));

        let f = raglan(ConstructionMethod::TopDown, NecklineType::Boat);
        let piece = yoke(&f.ctx(), Direction::TopDown).expect("yoke");
        let keys = keys(&piece);
        assert!(keys.contains(&TextKey::Neckband));
        assert!(keys.contains(&TextKey::BackNeckShortRows));
    }

    // Tests top-down sleeves are picked up with no cap shaping
    // Verified by generating a flat cap for seamless sleeves
    #[test]
    fn test_top_down_sleeve_picked_up() {
        let f = raglan(ConstructionMethod::TopDown, NecklineType::Crew);
        let piece = sleeve(&f.ctx(), Direction::TopDown).expect("sleeve");

        assert_eq!(
            piece.instructions.first().and_then(|ins| ins.note.as_ref()).map(|n| n.key),
            Some(TextKey::PickUpSleeve)
        );
        assert_eq!(piece.cast_on_stitches, 76);
        assert!(!keys(&piece).contains(&TextKey::ArmholeBindOff));
        assert_eq!(piece.quantity, 2);
    }

    // Tests bottom-up raglan sleeves start at the cuff and go on hold
    // Verified by picking up bottom-up raglan sleeves
    #[test]
    fn test_bottom_up_raglan_sleeve() {
        let f = raglan(ConstructionMethod::BottomUp, NecklineType::Crew);
        let piece = sleeve(&f.ctx(), Direction::BottomUp).expect("sleeve");

        assert_eq!(piece.cast_on_stitches, 40);
        assert_eq!(keys(&piece).last(), Some(&TextKey::PlaceOnHold));
        assert!(piece.covers_all_rows());
    }
}
