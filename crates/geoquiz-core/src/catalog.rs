//! Static country catalog.
//!
//! Every question is generated from this table. Entries are keyed by their
//! ISO-3166 alpha-2 code and never mutated at runtime.

use serde::Serialize;

use crate::model::{Continent, Domain};

/// A single catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Country {
    /// ISO-3166 alpha-2 code, upper case.
    pub iso: &'static str,
    /// Display name.
    pub name: &'static str,
    pub capital: &'static str,
    /// Flag emoji.
    pub flag: &'static str,
    /// Population in millions (approximate).
    pub population: f64,
    pub currency: &'static str,
    pub continent: Continent,
    /// Short fact shown as feedback after every answer.
    pub fact: &'static str,
}

macro_rules! country {
    ($iso:literal, $name:literal, $capital:literal, $flag:literal, $pop:literal, $currency:literal, $continent:ident, $fact:literal) => {
        Country {
            iso: $iso,
            name: $name,
            capital: $capital,
            flag: $flag,
            population: $pop,
            currency: $currency,
            continent: Continent::$continent,
            fact: $fact,
        }
    };
}

/// The full catalog.
pub static COUNTRIES: &[Country] = &[
    // Europe
    country!("FR", "France", "Paris", "🇫🇷", 68.2, "Euro", Europe, "La France est le pays le plus visité au monde."),
    country!("DE", "Allemagne", "Berlin", "🇩🇪", 84.4, "Euro", Europe, "L'Allemagne compte plus de 1 500 variétés de saucisses."),
    country!("ES", "Espagne", "Madrid", "🇪🇸", 48.3, "Euro", Europe, "Madrid est la capitale la plus haute d'Europe de l'Ouest."),
    country!("IT", "Italie", "Rome", "🇮🇹", 58.9, "Euro", Europe, "L'Italie abrite le plus grand nombre de sites classés à l'UNESCO."),
    country!("PT", "Portugal", "Lisbonne", "🇵🇹", 10.5, "Euro", Europe, "Le Portugal produit environ la moitié du liège mondial."),
    country!("GB", "Royaume-Uni", "Londres", "🇬🇧", 68.3, "Livre sterling", Europe, "Le métro de Londres est le plus ancien du monde (1863)."),
    country!("IE", "Irlande", "Dublin", "🇮🇪", 5.3, "Euro", Europe, "La harpe est l'emblème national de l'Irlande."),
    country!("NL", "Pays-Bas", "Amsterdam", "🇳🇱", 17.9, "Euro", Europe, "Environ un quart des Pays-Bas se trouve sous le niveau de la mer."),
    country!("BE", "Belgique", "Bruxelles", "🇧🇪", 11.8, "Euro", Europe, "La Belgique a trois langues officielles."),
    country!("CH", "Suisse", "Berne", "🇨🇭", 8.9, "Franc suisse", Europe, "La Suisse compte quatre langues nationales."),
    country!("AT", "Autriche", "Vienne", "🇦🇹", 9.1, "Euro", Europe, "Vienne fut pendant des siècles la capitale des Habsbourg."),
    country!("PL", "Pologne", "Varsovie", "🇵🇱", 36.7, "Złoty", Europe, "Marie Curie est née à Varsovie."),
    country!("SE", "Suède", "Stockholm", "🇸🇪", 10.6, "Couronne suédoise", Europe, "Stockholm est bâtie sur quatorze îles."),
    country!("NO", "Norvège", "Oslo", "🇳🇴", 5.5, "Couronne norvégienne", Europe, "La Norvège possède plus de 1 000 fjords."),
    country!("GR", "Grèce", "Athènes", "🇬🇷", 10.4, "Euro", Europe, "La Grèce compte environ 6 000 îles."),
    country!("VA", "Vatican", "Cité du Vatican", "🇻🇦", 0.001, "Euro", Europe, "Le Vatican est le plus petit État du monde."),
    // Afrique
    country!("MA", "Maroc", "Rabat", "🇲🇦", 37.8, "Dirham marocain", Africa, "L'université Al Quaraouiyine de Fès est l'une des plus anciennes du monde."),
    country!("DZ", "Algérie", "Alger", "🇩🇿", 45.6, "Dinar algérien", Africa, "L'Algérie est le plus grand pays d'Afrique."),
    country!("TN", "Tunisie", "Tunis", "🇹🇳", 12.5, "Dinar tunisien", Africa, "Les ruines de Carthage se trouvent près de Tunis."),
    country!("EG", "Égypte", "Le Caire", "🇪🇬", 112.7, "Livre égyptienne", Africa, "Le Nil traverse l'Égypte du sud au nord."),
    country!("SN", "Sénégal", "Dakar", "🇸🇳", 18.0, "Franc CFA", Africa, "Dakar est la ville la plus à l'ouest du continent africain."),
    country!("CI", "Côte d'Ivoire", "Yamoussoukro", "🇨🇮", 28.9, "Franc CFA", Africa, "La Côte d'Ivoire est le premier producteur mondial de cacao."),
    country!("NG", "Nigeria", "Abuja", "🇳🇬", 223.8, "Naira", Africa, "Le Nigeria est le pays le plus peuplé d'Afrique."),
    country!("KE", "Kenya", "Nairobi", "🇰🇪", 55.1, "Shilling kényan", Africa, "Le Kenya est traversé par l'équateur."),
    country!("ET", "Éthiopie", "Addis-Abeba", "🇪🇹", 126.5, "Birr", Africa, "L'Éthiopie n'a jamais été colonisée durablement."),
    country!("ZA", "Afrique du Sud", "Pretoria", "🇿🇦", 60.4, "Rand", Africa, "L'Afrique du Sud possède trois capitales."),
    country!("MG", "Madagascar", "Antananarivo", "🇲🇬", 30.3, "Ariary", Africa, "La plupart des lémuriens ne vivent qu'à Madagascar."),
    country!("CD", "RD Congo", "Kinshasa", "🇨🇩", 102.3, "Franc congolais", Africa, "Le fleuve Congo est le plus profond du monde."),
    // Asie
    country!("CN", "Chine", "Pékin", "🇨🇳", 1410.7, "Yuan", Asia, "La Grande Muraille s'étend sur plus de 20 000 km."),
    country!("JP", "Japon", "Tokyo", "🇯🇵", 124.5, "Yen", Asia, "Le Japon compte plus de 6 800 îles."),
    country!("IN", "Inde", "New Delhi", "🇮🇳", 1428.6, "Roupie indienne", Asia, "L'Inde est le pays le plus peuplé du monde."),
    country!("KR", "Corée du Sud", "Séoul", "🇰🇷", 51.7, "Won", Asia, "L'alphabet coréen, le hangeul, date du XVe siècle."),
    country!("ID", "Indonésie", "Jakarta", "🇮🇩", 277.5, "Roupie indonésienne", Asia, "L'Indonésie est le plus grand archipel du monde."),
    country!("TH", "Thaïlande", "Bangkok", "🇹🇭", 71.8, "Baht", Asia, "La Thaïlande n'a jamais été colonisée par une puissance européenne."),
    country!("VN", "Viêt Nam", "Hanoï", "🇻🇳", 98.9, "Dong", Asia, "La baie d'Halong compte près de 2 000 îlots."),
    country!("PH", "Philippines", "Manille", "🇵🇭", 117.3, "Peso philippin", Asia, "Les Philippines comptent plus de 7 000 îles."),
    country!("TR", "Turquie", "Ankara", "🇹🇷", 85.3, "Livre turque", Asia, "Istanbul s'étend sur deux continents."),
    country!("SA", "Arabie saoudite", "Riyad", "🇸🇦", 36.9, "Riyal saoudien", Asia, "L'Arabie saoudite n'a aucune rivière permanente."),
    country!("IR", "Iran", "Téhéran", "🇮🇷", 89.2, "Rial iranien", Asia, "Persépolis fut la capitale de l'Empire perse."),
    country!("MN", "Mongolie", "Oulan-Bator", "🇲🇳", 3.4, "Tugrik", Asia, "Oulan-Bator est la capitale la plus froide du monde."),
    // Amériques
    country!("US", "États-Unis", "Washington", "🇺🇸", 334.9, "Dollar américain", Americas, "Les États-Unis comptent 50 États."),
    country!("CA", "Canada", "Ottawa", "🇨🇦", 40.1, "Dollar canadien", Americas, "Le Canada possède le plus long littoral du monde."),
    country!("MX", "Mexique", "Mexico", "🇲🇽", 128.5, "Peso mexicain", Americas, "Mexico est construite sur un ancien lac."),
    country!("BR", "Brésil", "Brasília", "🇧🇷", 216.4, "Real", Americas, "Le Brésil abrite la majeure partie de la forêt amazonienne."),
    country!("AR", "Argentine", "Buenos Aires", "🇦🇷", 46.6, "Peso argentin", Americas, "L'Aconcagua, en Argentine, est le plus haut sommet des Amériques."),
    country!("CL", "Chili", "Santiago", "🇨🇱", 19.6, "Peso chilien", Americas, "Le désert d'Atacama est l'un des plus secs du monde."),
    country!("PE", "Pérou", "Lima", "🇵🇪", 34.4, "Sol", Americas, "Le Machu Picchu se trouve au Pérou."),
    country!("CO", "Colombie", "Bogota", "🇨🇴", 52.1, "Peso colombien", Americas, "La Colombie est le premier producteur mondial d'émeraudes."),
    country!("CU", "Cuba", "La Havane", "🇨🇺", 11.1, "Peso cubain", Americas, "Cuba est la plus grande île des Caraïbes."),
    country!("VE", "Venezuela", "Caracas", "🇻🇪", 28.8, "Bolívar", Americas, "Le Salto Angel, au Venezuela, est la plus haute chute d'eau du monde."),
    country!("UY", "Uruguay", "Montevideo", "🇺🇾", 3.4, "Peso uruguayen", Americas, "L'Uruguay a remporté la première Coupe du monde de football en 1930."),
    country!("JM", "Jamaïque", "Kingston", "🇯🇲", 2.8, "Dollar jamaïcain", Americas, "La Jamaïque est le berceau du reggae."),
    // Océanie
    country!("AU", "Australie", "Canberra", "🇦🇺", 26.6, "Dollar australien", Oceania, "La Grande Barrière de corail est visible depuis l'espace."),
    country!("NZ", "Nouvelle-Zélande", "Wellington", "🇳🇿", 5.2, "Dollar néo-zélandais", Oceania, "La Nouvelle-Zélande fut le premier pays à accorder le droit de vote aux femmes."),
    country!("FJ", "Fidji", "Suva", "🇫🇯", 0.9, "Dollar fidjien", Oceania, "Les Fidji comptent plus de 300 îles."),
    country!("PG", "Papouasie-Nouvelle-Guinée", "Port Moresby", "🇵🇬", 10.3, "Kina", Oceania, "Plus de 800 langues sont parlées en Papouasie-Nouvelle-Guinée."),
    country!("WS", "Samoa", "Apia", "🇼🇸", 0.2, "Tala", Oceania, "Les Samoa ont sauté un jour calendaire en 2011 pour changer de fuseau."),
    country!("TO", "Tonga", "Nukuʻalofa", "🇹🇴", 0.1, "Paʻanga", Oceania, "Les Tonga sont le dernier royaume de Polynésie."),
    country!("VU", "Vanuatu", "Port-Vila", "🇻🇺", 0.3, "Vatu", Oceania, "Le Vanuatu abrite l'un des volcans les plus accessibles au monde, le Yasur."),
];

/// Every catalog entry.
pub fn countries() -> &'static [Country] {
    COUNTRIES
}

/// Look up a country by ISO code (case-insensitive).
pub fn find(iso: &str) -> Option<&'static Country> {
    let iso = iso.trim();
    COUNTRIES.iter().find(|c| c.iso.eq_ignore_ascii_case(iso))
}

/// Look up a country by display name (case-insensitive).
pub fn find_by_name(name: &str) -> Option<&'static Country> {
    let name = name.trim().to_lowercase();
    COUNTRIES.iter().find(|c| c.name.to_lowercase() == name)
}

/// The entries a question may target for a zone: the whole catalog for
/// [`Domain::World`], the continent's countries otherwise.
pub fn pool(zone: Domain) -> Vec<&'static Country> {
    match zone.continent() {
        None => COUNTRIES.iter().collect(),
        Some(continent) => COUNTRIES
            .iter()
            .filter(|c| c.continent == continent)
            .collect(),
    }
}
