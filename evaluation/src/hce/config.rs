#[derive(Debug, Clone, Copy)]
pub struct HCEConfig {
    pub tempo_bonus: i16,

    // Pawn structure
    pub doubled_pawn_penalty: i16,
    pub tripled_pawn_penalty: i16,
    pub isolated_pawn_penalty: i16,
    pub backward_pawn_penalty: i16,
    pub backward_pawn_half_open_penalty: i16,
    pub center_pawn_bonus: i16,

    // Passed pawns: linear * (rank-1) + quadratic * (rank-1)^2
    pub passed_pawn_linear: i16,
    pub passed_pawn_quadratic: i16,

    // Piece terms
    pub bishop_pair_bonus: i16,
    pub knight_outpost_bonus: i16,
    pub bad_bishop_penalty: i16,
    pub rook_open_file_bonus: i16,
    pub rook_semi_open_file_bonus: i16,
    pub rook_seventh_rank_bonus: i16,
    pub early_queen_penalty: i16,

    // Mobility multipliers
    pub knight_mobility_multiplier: i16,
    pub bishop_mobility_multiplier: i16,
    pub rook_mobility_multiplier: i16,
    pub queen_mobility_multiplier: i16,

    // King safety - Pawn shield
    pub king_shield_r1_bonus: i16,
    pub king_shield_r2_bonus: i16,

    // King safety - File penalties
    pub king_open_file_penalty: i16,
    pub king_semi_open_file_penalty: i16,
    pub king_thin_cover_penalty: i16,

    // King safety - Attack pressure
    pub king_pressure_knight: i16,
    pub king_pressure_bishop: i16,
    pub king_pressure_rook: i16,
    pub king_pressure_queen: i16,
    pub king_pressure_pawn: i16,

    // King safety - Positional
    pub king_central_penalty: i16,
    pub king_activity_bonus: i16,

    // Threats and coordination
    pub threats_multiplier: i16,
    pub supported_minor_bonus: i16,
    pub supported_major_bonus: i16,

    pub space_multiplier: i16,
}

impl Default for HCEConfig {
    fn default() -> Self {
        Self {
            tempo_bonus: 10,

            doubled_pawn_penalty: 30,
            tripled_pawn_penalty: 60,
            isolated_pawn_penalty: 39,
            backward_pawn_penalty: 20,
            backward_pawn_half_open_penalty: 10,
            center_pawn_bonus: 15,

            passed_pawn_linear: 7,
            passed_pawn_quadratic: 4,

            bishop_pair_bonus: 50,
            knight_outpost_bonus: 20,
            bad_bishop_penalty: 5,
            rook_open_file_bonus: 15,
            rook_semi_open_file_bonus: 10,
            rook_seventh_rank_bonus: 20,
            early_queen_penalty: 15,

            knight_mobility_multiplier: 5,
            bishop_mobility_multiplier: 3,
            rook_mobility_multiplier: 3,
            queen_mobility_multiplier: 1,

            king_shield_r1_bonus: 12,
            king_shield_r2_bonus: 6,
            king_open_file_penalty: 24,
            king_semi_open_file_penalty: 12,
            king_thin_cover_penalty: 6,
            king_pressure_knight: 12,
            king_pressure_bishop: 14,
            king_pressure_rook: 18,
            king_pressure_queen: 22,
            king_pressure_pawn: 8,
            king_central_penalty: 20,
            king_activity_bonus: 14,

            threats_multiplier: 50,
            supported_minor_bonus: 5,
            supported_major_bonus: 10,

            space_multiplier: 4,
        }
    }
}

/// Term groups that can be switched off wholesale, e.g. for weaker play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalToggles {
    /// Pawn structure and passed pawn terms.
    pub pawn_structure: bool,
    /// Drawish-endgame scaling.
    pub winnable: bool,
    /// Bishop pair.
    pub imbalances: bool,
}

impl Default for EvalToggles {
    fn default() -> Self {
        Self {
            pawn_structure: true,
            winnable: true,
            imbalances: true,
        }
    }
}
