//! Fixed UI strings per locale. Unknown locales fall back to English.

pub struct Labels {
    pub unavailable: &'static str,
    pub about_author: &'static str,
    pub book: &'static str,
    pub total: &'static str,
    pub duration: &'static str,
    /// TOC title and `aria-label`.
    pub toc: &'static str,
}

const EN: Labels = Labels {
    unavailable: "This content is currently unavailable.",
    about_author: "About the author",
    book: "Check availability",
    total: "Total",
    duration: "Duration",
    toc: "In this article",
};

const ES: Labels = Labels {
    unavailable: "Este contenido no está disponible en este momento.",
    about_author: "Sobre el autor",
    book: "Ver disponibilidad",
    total: "Total",
    duration: "Duración",
    toc: "En este artículo",
};

const FR: Labels = Labels {
    unavailable: "Ce contenu est actuellement indisponible.",
    about_author: "À propos de l'auteur",
    book: "Voir les disponibilités",
    total: "Total",
    duration: "Durée",
    toc: "Dans cet article",
};

const DE: Labels = Labels {
    unavailable: "Dieser Inhalt ist derzeit nicht verfügbar.",
    about_author: "Über den Autor",
    book: "Verfügbarkeit prüfen",
    total: "Gesamt",
    duration: "Dauer",
    toc: "In diesem Artikel",
};

const PT: Labels = Labels {
    unavailable: "Este conteúdo não está disponível no momento.",
    about_author: "Sobre o autor",
    book: "Ver disponibilidade",
    total: "Total",
    duration: "Duração",
    toc: "Neste artigo",
};

const IT: Labels = Labels {
    unavailable: "Questo contenuto non è al momento disponibile.",
    about_author: "Sull'autore",
    book: "Verifica disponibilità",
    total: "Totale",
    duration: "Durata",
    toc: "In questo articolo",
};

pub fn labels(language: &str) -> &'static Labels {
    match language.split(['-', '_']).next().unwrap_or("") {
        "es" => &ES,
        "fr" => &FR,
        "de" => &DE,
        "pt" => &PT,
        "it" => &IT,
        _ => &EN,
    }
}
