/// Display unit of an instrument's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Rial-denominated upstream, shown divided by 10 with thousands grouping
    Toman,
    /// Shown as delivered, labeled in Rial
    Rial,
    /// Quoted in USD upstream, shown as delivered
    Dollar,
}

impl Unit {
    /// Farsi unit suffix appended after the value
    pub fn suffix(&self) -> &'static str {
        match self {
            Unit::Toman => "تومان",
            Unit::Rial => "ریال",
            Unit::Dollar => "دلار",
        }
    }
}

/// One tracked instrument of the market feed.
///
/// The feed keys its records by string codes; keeping the tracked set as a
/// closed enum means adding an instrument is one variant plus one arm in each
/// mapping method, and the report order is a plain const below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instrument {
    UsDollar,
    Euro,
    BritishPound,
    CanadianDollar,
    AustralianDollar,
    UaeDirham,
    TurkishLira,
    SwedishKrona,
    ChineseYuan,
    SaudiRiyal,
    IraqiDinar,
    Bitcoin,
    Tether,
    Ethereum,
    AzadiCoin,
    EmamiCoin,
    HalfCoin,
    QuarterCoin,
    OldQuarterCoin,
    GoldGram18,
    GoldMesghal,
    GoldOunce,
}

impl Instrument {
    /// Key of this instrument in the pricing API response
    pub fn code(&self) -> &'static str {
        match self {
            Instrument::UsDollar => "price_dollar_rl",
            Instrument::Euro => "price_eur",
            Instrument::BritishPound => "price_gbp",
            Instrument::CanadianDollar => "price_cad",
            Instrument::AustralianDollar => "price_aud",
            Instrument::UaeDirham => "price_aed",
            Instrument::TurkishLira => "price_try",
            Instrument::SwedishKrona => "price_sek",
            Instrument::ChineseYuan => "price_cny",
            Instrument::SaudiRiyal => "price_sar",
            Instrument::IraqiDinar => "price_iqd",
            Instrument::Bitcoin => "crypto-bitcoin",
            Instrument::Tether => "crypto-tether-irr",
            Instrument::Ethereum => "crypto-ethereum",
            Instrument::AzadiCoin => "sekeb",
            Instrument::EmamiCoin => "sekee",
            Instrument::HalfCoin => "nim",
            Instrument::QuarterCoin => "rob",
            Instrument::OldQuarterCoin => "rob_down",
            Instrument::GoldGram18 => "geram18",
            Instrument::GoldMesghal => "mesghal",
            Instrument::GoldOunce => "ons",
        }
    }

    /// Farsi report label, emoji included
    pub fn label(&self) -> &'static str {
        match self {
            Instrument::UsDollar => "🇺🇸 دلار امریکا",
            Instrument::Euro => "🇪🇺 یورو اروپا",
            Instrument::BritishPound => "🇬🇧 پوند انگلیس",
            Instrument::CanadianDollar => "🇨🇦 دلار کانادا",
            Instrument::AustralianDollar => "🇦🇺 دلار استرالیا",
            Instrument::UaeDirham => "🇦🇪 درهم امارات",
            Instrument::TurkishLira => "🇹🇷 لیر ترکیه",
            Instrument::SwedishKrona => "🇸🇪 کرون سوئد",
            Instrument::ChineseYuan => "🇨🇳 یوان چین",
            Instrument::SaudiRiyal => "🇸🇦 ریال عربستان",
            Instrument::IraqiDinar => "🇮🇶 دینار عراق",
            Instrument::Bitcoin => "👑 بیتکوین",
            Instrument::Tether => "🇺🇸 تتر",
            Instrument::Ethereum => "💠 اتریوم",
            Instrument::AzadiCoin => "🪙 سکه بهار آزادی",
            Instrument::EmamiCoin => "🪙 سکه امامی",
            Instrument::HalfCoin => "🪙 نیم سکه",
            Instrument::QuarterCoin => "🪙 ربع سکه",
            Instrument::OldQuarterCoin => "🪙 ربع سکه قبل ۸۶",
            Instrument::GoldGram18 => "💰 طلا گرمی",
            Instrument::GoldMesghal => "💰 مثقال طلا",
            Instrument::GoldOunce => "💰 انس طلا",
        }
    }

    /// Unit the value is rendered in
    pub fn unit(&self) -> Unit {
        match self {
            Instrument::IraqiDinar => Unit::Rial,
            Instrument::Bitcoin | Instrument::Ethereum | Instrument::GoldOunce => Unit::Dollar,
            _ => Unit::Toman,
        }
    }
}

/// Report groups, in display order; a blank line separates groups.
pub const REPORT_GROUPS: &[&[Instrument]] = &[
    &[
        Instrument::UsDollar,
        Instrument::Euro,
        Instrument::BritishPound,
        Instrument::CanadianDollar,
        Instrument::AustralianDollar,
        Instrument::UaeDirham,
        Instrument::TurkishLira,
        Instrument::SwedishKrona,
        Instrument::ChineseYuan,
        Instrument::SaudiRiyal,
        Instrument::IraqiDinar,
    ],
    &[Instrument::Bitcoin, Instrument::Tether, Instrument::Ethereum],
    &[
        Instrument::AzadiCoin,
        Instrument::EmamiCoin,
        Instrument::HalfCoin,
        Instrument::QuarterCoin,
        Instrument::OldQuarterCoin,
    ],
    &[
        Instrument::GoldGram18,
        Instrument::GoldMesghal,
        Instrument::GoldOunce,
    ],
];
