//! Tests for piece order and construction by role dispatch

#[cfg(test)]
mod tests {
    use crate::support::{Fixture, analysis, measurements};
    use knitgen::PatternError;
    use knitgen::generation::pieces::{generate_piece, piece_order};
    use knitgen::model::garment::{ConstructionMethod, GarmentType, NecklineType, SleeveStyle};
    use knitgen::model::pattern::PieceRole;

    fn fixture(
        garment: GarmentType,
        construction: ConstructionMethod,
        neckline: NecklineType,
        sleeves: SleeveStyle,
    ) -> Fixture {
        Fixture::new(&analysis(garment, construction, neckline, sleeves))
    }

    // Tests assembled pullovers are knitted back, front, sleeves
    // Verified by reordering the flat pieces
    #[test]
    fn test_assembled_order() {
        let f = fixture(
            GarmentType::Pullover,
            ConstructionMethod::AssembledPieces,
            NecklineType::Crew,
            SleeveStyle::SetIn,
        );
        assert_eq!(
            piece_order(&f.garment),
            vec![PieceRole::Back, PieceRole::Front, PieceRole::Sleeve]
        );
    }

    // Tests cardigans split the front and hoods come last
    // Verified by omitting the hood
    #[test]
    fn test_cardigan_hood_order() {
        let f = fixture(
            GarmentType::Cardigan,
            ConstructionMethod::AssembledPieces,
            NecklineType::Hood,
            SleeveStyle::SetIn,
        );
        assert_eq!(
            piece_order(&f.garment),
            vec![
                PieceRole::Back,
                PieceRole::LeftFront,
                PieceRole::RightFront,
                PieceRole::Sleeve,
                PieceRole::Hood,
            ]
        );
    }

    // Tests seamless raglans start at the hem or at the neck
    // Verified by using the bottom-up order for top-down yokes
    #[test]
    fn test_seamless_raglan_order() {
        let bottom_up = fixture(
            GarmentType::Pullover,
            ConstructionMethod::BottomUp,
            NecklineType::Crew,
            SleeveStyle::Raglan,
        );
        assert_eq!(
            piece_order(&bottom_up.garment),
            vec![PieceRole::Body, PieceRole::Sleeve, PieceRole::Yoke]
        );

        let top_down = fixture(
            GarmentType::Pullover,
            ConstructionMethod::TopDown,
            NecklineType::Crew,
            SleeveStyle::Raglan,
        );
        assert_eq!(
            piece_order(&top_down.garment),
            vec![PieceRole::Yoke, PieceRole::Body, PieceRole::Sleeve]
        );
    }

    // Tests seamless vests get a body, flat uppers and armhole borders
    // Verified by emitting sleeves for vests
    #[test]
    fn test_seamless_vest_order() {
        let f = fixture(
            GarmentType::Vest,
            ConstructionMethod::BottomUp,
            NecklineType::VNeck,
            SleeveStyle::None,
        );
        assert_eq!(
            piece_order(&f.garment),
            vec![
                PieceRole::Body,
                PieceRole::Back,
                PieceRole::Front,
                PieceRole::ArmholeBorder,
            ]
        );
    }

    // Tests every piece in the order can be generated
    // Verified by leaving a role without a routine
    #[test]
    fn test_every_ordered_piece_generates() {
        let cases = [
            (ConstructionMethod::AssembledPieces, SleeveStyle::SetIn),
            (ConstructionMethod::AssembledPieces, SleeveStyle::Raglan),
            (ConstructionMethod::AssembledPieces, SleeveStyle::DropShoulder),
            (ConstructionMethod::BottomUp, SleeveStyle::Raglan),
            (ConstructionMethod::BottomUp, SleeveStyle::SetIn),
            (ConstructionMethod::TopDown, SleeveStyle::Raglan),
        ];
        for (construction, sleeves) in cases {
            for garment in [GarmentType::Pullover, GarmentType::Cardigan] {
                let f = fixture(garment, construction, NecklineType::Crew, sleeves);
                for role in piece_order(&f.garment) {
                    let piece = generate_piece(&f.ctx(), role).expect("piece generates");
                    assert_eq!(piece.role, role);
                    assert!(piece.covers_all_rows(), "{construction} {sleeves} {role}");
                }
            }
        }
    }

    // Tests a body-only role is refused for assembled garments
    // Verified by generating a seamless body for flat garments
    #[test]
    fn test_assembled_body_refused() {
        let f = fixture(
            GarmentType::Pullover,
            ConstructionMethod::AssembledPieces,
            NecklineType::Crew,
            SleeveStyle::SetIn,
        );
        assert!(matches!(
            generate_piece(&f.ctx(), PieceRole::Yoke),
            Err(PatternError::PieceGeneration { .. })
        ));
    }

    // Tests malformed measurements fail only the pieces that need them
    // Verified by validating every measurement for every piece
    #[test]
    fn test_failure_is_per_piece() {
        let mut m = measurements();
        m.wrist_circumference = f64::NAN;
        let f = fixture(
            GarmentType::Pullover,
            ConstructionMethod::AssembledPieces,
            NecklineType::Crew,
            SleeveStyle::SetIn,
        )
        .with_measurements(m);

        assert!(generate_piece(&f.ctx(), PieceRole::Back).is_ok());
        assert!(generate_piece(&f.ctx(), PieceRole::Sleeve).is_err());
    }
}
