//! Built-in category and priority rule tables.

/// Key of the catch-all category.
pub const FALLBACK_KEY: &str = "otros";

/// (key, display name, icon, color, keywords) in matching order.
pub(super) const CATEGORY_DEFS: &[(&str, &str, &str, &str, &[&str])] = &[
    (
        "proteinas",
        "Proteínas",
        "🥩",
        "#e74c3c",
        &[
            "PECHUGA", "POLLO", "PAVO", "CERDO", "TERNERA", "BURGER", "JAMÓN", "JAMON",
            "CECINA", "SALMON", "SALMÓN", "HUEVO", "HUEVOS", "CHULETA", "CONTRAMUSLO",
            "LOMO", "FILETE", "ATÚN", "ATUN", "MERLUZA", "TRUCHA", "DORADA", "LUBINA",
            "MORTADELA", "LONGANIZA", "SALCHICHA", "FRANKFURT", "ALBÓNDIGA", "ALBONDIGA",
            "NUGGETS", "CROQUETAS", "LANGOSTINO", "GAMBA", "CALAMAR", "MEJILLON",
            "SARDINA", "CHIPIRON", "MEDALLON", "RODAJA", "SERRANO", "CORTADO A CUCHILLO",
            "KEBAB", "TIRAS POLLO", "MUSLITO", "CODILLO", "CARRILLERA", "RELLENITO",
            "BROCHETA", "JAMONCITO", "FIAMBRE", "RESERVA TAPAS", "FUET", "COMPANGO",
        ],
    ),
    (
        "lacteos",
        "Lácteos",
        "🧀",
        "#f39c12",
        &[
            "LECHE", "QUESO", "YOGUR", "KÉFIR", "KEFIR", "COTTAGE", "MOZZARELLA",
            "MANTEQUILLA", "NATA", "BURRATA", "FETA", "GRIEGO", "BÍFIDUS", "BIFIDUS",
            "ALPRO", "SOJA", "+PROT", "PROTEÍNA", "PROTEINA", "PROTEIN",
        ],
    ),
    (
        "frutas_verduras",
        "Frutas y Verduras",
        "🥬",
        "#27ae60",
        &[
            "TOMATE", "CEBOLLA", "ZANAHORIA", "PLATANO", "PLÁTANO", "BANANA", "MANGO",
            "KIWI", "MANZANA", "PERA", "NARANJA", "MANDARINA", "LIMON", "LIMÓN",
            "AGUACATE", "PEPINO", "CALABACIN", "CALABACÍN", "ESPINACA", "RUCULA",
            "LECHUGA", "BROTES", "ENSALADA", "APIO", "PIMIENTO", "PUERRO",
            "COLIFLOR", "BROCOLI", "BRÓCOLI", "PATATA", "BATATA", "SETA", "CHAMPIÑON",
            "AJO", "FRESÓN", "FRESON", "FRAMBUESA", "ARÁNDANO", "ARANDANO", "CEREZA",
            "CIRUELA", "MELON", "MELÓN", "SANDÍA", "SANDIA", "PIÑA", "BREVAS",
            "UVA", "LIMA", "GUACAMOLE", "GAZPACHO", "SALMOREJO", "CALABAZA",
            "ESPARRAGO", "ESPÁRRAGO", "GUISANTES", "JUDÍA", "JUDIA", "ICEBERG",
            "CANÓNIGOS", "ALBAHACA", "PEREJIL", "DÁTIL", "DATIL", "REMOLACHA",
        ],
    ),
    (
        "bebidas",
        "Bebidas",
        "🥤",
        "#3498db",
        &[
            "COLA", "AGUA", "CERVEZA", "ZUMO", "CAFÉ", "CAFE", "TÓNICA", "TONICA",
            "SPRITE", "LIMONADA", "ISOTONIC", "ENERG", "RADLER", "VINO", "GINEBRA",
            "VERMOUTH", "BEBIDA", "NECTAR", "ANTIOX", "SHOT",
        ],
    ),
    (
        "congelados",
        "Congelados",
        "🧊",
        "#9b59b6",
        &[
            "PIZZA", "NUGGETS", "LASAÑA", "LASANA", "EMPANADA", "CANELONES", "CANELON",
            "CANELÓN", "WAFFLE", "PATATAS GAJO", "PATATAS HORNO", "TEQUEÑOS", "TEMPURA",
            "FIGURITAS", "CROQUETAS", "ARROZ TRES", "BENTO", "POKE", "CONGELAD",
            "HIELO", "WONTON", "EMPANADO", "ÑOQUIS",
        ],
    ),
    (
        "despensa",
        "Despensa",
        "🍚",
        "#1abc9c",
        &[
            "ARROZ", "PASTA", "MACARRON", "SPAGHETTI", "PENNE", "HELICES", "PAJARITAS",
            "FIDEOS", "FIDEO", "ACEITE", "TOMATE FRITO", "TOMATE TRITURADO", "SAL",
            "HARINA", "AZUCAR", "AZÚCAR", "LEGUMBRE", "GARBANZO", "LENTEJA", "FABADA",
            "COCIDO", "CALDO", "SOPA", "CREMA DE", "TORTILLA", "PAN ", "PANECILLO",
            "BARRA", "CROISSANT", "NAPOLITANA", "NACHOS", "CRACKERS", "MOSTAZA",
            "MAYONESA", "ALLIOLI", "SALSA", "HUMMUS", "TSATSIKI", "ACEITUNA",
            "MEJILLONES ESCAB", "SARDINAS", "CABALLA", "ALMEJONES", "WAKAME",
            "MIEL", "LEVADURA", "ESPECIAS", "CANELA", "PIMIENTA", "LAUREL",
        ],
    ),
    (
        "dulces_snacks",
        "Dulces y Snacks",
        "🍫",
        "#e67e22",
        &[
            "CHOCOLATE", "CHOCO", "GALLETA", "CROISSANT", "BERLINA", "BOMBON",
            "TURRON", "TURRÓN", "POLVORON", "POLVORÓN", "GOLOSINA", "GOMINOLA",
            "CARAMELO", "CHICLE", "CACAHUETE", "SNACK", "CHEETOS", "DORITOS",
            "COCKTAIL", "FRUTOS SECOS", "NUEZ", "HELADO", "CONO", "GRANIZADO",
            "PANETTONE", "PANDORO", "MAZAPAN", "MAZAPÁN", "ROSCÓN", "ROSCON",
            "BARRITA", "STICKS", "COOKIES", "DIGESTIVE", "MINIS LECHE", "KIT-KAT",
            "SUPERSANDWICH", "MINISANDWICH", "COULANT", "MOUSSE",
        ],
    ),
    (
        "higiene_limpieza",
        "Higiene y Limpieza",
        "🧴",
        "#95a5a6",
        &[
            "PAPEL", "JABÓN", "JABON", "DETERGENTE", "GEL", "CHAMPÚ", "CHAMPU",
            "DEO", "DESODORANTE", "CEPILLO", "PASTA DENT", "COLG", "ENJUAGUE",
            "SUAVIZANTE", "LAVAVAJILLAS", "LIMPIA", "ESTROPAJO", "FREGONA",
            "BOLSA BASURA", "ROLLO", "SERVILLETA", "TOALLITA", "PAÑUELO", "PANUELO",
            "BASTONCILLO", "DISCO", "ESPONJA", "FILM", "ALUMINIO", "SPRAY",
            "AMBIENTADOR", "VELA", "PERFUME", "EDP", "COLONIA", "CREMA", "MASCARILLA",
            "MAQUILLAJE", "MASCARA", "LABIAL", "MAQUINILLA", "COMP.", "PAÑAL",
            "GASAS", "T.HIDROALC", "LÁGRIMAS", "PROTECTOR",
        ],
    ),
    (FALLBACK_KEY, "Otros", "📦", "#7f8c8d", &[]),
];

/// (pattern, category key). Evaluated top to bottom against the upper-cased
/// product name; the first hit wins over any keyword match.
pub(super) const PRIORITY_RULE_DEFS: &[(&str, &str)] = &[
    // Frozen ready meals named after their dairy or meat toppings.
    (r"CONGELAD", "congelados"),
    (r"\bPIZZA", "congelados"),
    (r"^CROQUETAS?\b|\bNUGGETS\b", "congelados"),
    (r"LASA[ÑN]A|CANEL[OÓ]N", "congelados"),
    (r"PATATAS? (GAJO|HORNO|PREFRITAS?)", "congelados"),
    // Ice cream and sweets that mention milk or cream.
    (r"\bHELADO|GRANIZADO", "dulces_snacks"),
    (r"CHOCO|MINIS LECHE|GALLETA|BARRITA", "dulces_snacks"),
    (r"PATATAS? FRITAS|\bCHIPS\b", "dulces_snacks"),
    // Tinned and jarred goods that share a word with fresh produce.
    (r"TOMATE (FRITO|TRITURADO|TAMIZADO|CONCENTRADO)", "despensa"),
    (r"^SALSA\b|KETCHUP", "despensa"),
    (r"MEJILLONES ESCAB|SARDINAS|\bCABALLA\b", "despensa"),
    (r"\bTORTILLA\b", "despensa"),
    // Personal care products carrying food words.
    (
        r"PASTA DENT|COLGATE|CREMA (DE )?(MANOS|CORPORAL|FACIAL|SOLAR)|LECHE (LIMPIADORA|CORPORAL)",
        "higiene_limpieza",
    ),
    // Drinks that would otherwise fall into dairy.
    (r"^CAF[EÉ]\b", "bebidas"),
    (r"BEBIDA (DE )?(SOJA|AVENA|ALMENDRA)", "bebidas"),
];
