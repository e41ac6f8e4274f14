//! The `quizbank init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("quizbank.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("data").context("failed to create data/")?;
    for (file, content) in SAMPLE_BANKS {
        write_if_missing(&Path::new("data").join(file), content)?;
    }

    println!("\nNext steps:");
    println!("  1. Add questions to the files in data/");
    println!("  2. Run: quizbank themes");
    println!("  3. Run: quizbank play --themes HTML,CSS --length courte");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizbank configuration

default_level = "mixte"
default_length = "courte"

[source]
type = "directory"
path = "./data"
# type = "http"
# base_url = "https://example.com/quiz/data"

[[themes]]
name = "Bases de données"
file = "bases_de_donnees.json"

[[themes]]
name = "HTML"
file = "html.json"

[[themes]]
name = "CSS"
file = "css.json"

[[themes]]
name = "JavaScript"
file = "javascript.json"

[[themes]]
name = "PHP"
file = "php.json"

[lengths]
courte = 20
moyenne = 40
longue = 60
"#;

const SAMPLE_BANKS: [(&str, &str); 5] = [
    ("bases_de_donnees.json", DATABASES_BANK),
    ("html.json", HTML_BANK),
    ("css.json", CSS_BANK),
    ("javascript.json", JAVASCRIPT_BANK),
    ("php.json", PHP_BANK),
];

const DATABASES_BANK: &str = r##"[
  {"id": "sql-1", "theme": "Bases de données", "niveau": "debutant", "type": "choix_simple",
   "question": "Quelle commande SQL permet de lire des données ?",
   "options": ["SELECT", "INSERT", "UPDATE", "DELETE"], "reponse": ["SELECT"],
   "explication": "`SELECT` lit des lignes sans les modifier."},
  {"id": "sql-2", "theme": "Bases de données", "niveau": "debutant", "type": "saisie_libre",
   "question": "Écrivez la requête qui renvoie toutes les colonnes de la table `clients`.",
   "reponse": ["SELECT * FROM clients;"],
   "explication": "`*` sélectionne toutes les colonnes."},
  {"id": "sql-3", "theme": "Bases de données", "niveau": "intermediaire", "type": "choix_multiple",
   "question": "Lesquelles sont des fonctions d'agrégation ?",
   "options": ["COUNT", "SUM", "UPPER", "AVG"], "reponse": ["COUNT", "SUM", "AVG"],
   "explication": "`UPPER` agit ligne par ligne, les autres résument un groupe."},
  {"id": "sql-4", "theme": "Bases de données", "niveau": "intermediaire", "type": "zone_saisie",
   "question": "Quel mot-clé filtre les groupes après un `GROUP BY` ?",
   "reponse": ["HAVING"],
   "explication": "`WHERE` filtre les lignes, `HAVING` filtre les groupes."},
  {"id": "sql-5", "theme": "Bases de données", "niveau": "avance", "type": "choix_simple",
   "question": "Quelle jointure conserve toutes les lignes de la table de gauche ?",
   "options": ["INNER JOIN", "LEFT JOIN", "CROSS JOIN"], "reponse": ["LEFT JOIN"],
   "explication": "Les colonnes de droite sans correspondance valent NULL."},
  {"id": "sql-6", "theme": "Bases de données", "niveau": "avance", "type": "saisie_libre",
   "question": "Supprimez toutes les lignes de la table `logs` sans supprimer la table.",
   "reponse": ["DELETE FROM logs;", "TRUNCATE TABLE logs;"],
   "explication": "```DROP TABLE logs;``` supprimerait aussi la structure."}
]
"##;

const HTML_BANK: &str = r##"[
  {"id": "html-1", "theme": "HTML", "niveau": "debutant", "type": "choix_simple",
   "question": "Quelle balise crée un lien hypertexte ?",
   "options": ["<a>", "<link>", "<href>"], "reponse": ["<a>"],
   "explication": "`<link>` relie une ressource externe, pas un lien cliquable."},
  {"id": "html-2", "theme": "HTML", "niveau": "debutant", "type": "zone_saisie",
   "question": "Quelle balise contient le titre affiché dans l'onglet du navigateur ?",
   "reponse": ["<title>", "title"],
   "explication": "`<title>` se place dans `<head>`."},
  {"id": "html-3", "theme": "HTML", "niveau": "intermediaire", "type": "choix_multiple",
   "question": "Lesquels sont des éléments sémantiques ?",
   "options": ["<article>", "<nav>", "<div>", "<span>"], "reponse": ["<article>", "<nav>"],
   "explication": "`<div>` et `<span>` ne portent aucun sens."},
  {"id": "html-4", "theme": "HTML", "niveau": "intermediaire", "type": "choix_simple",
   "question": "Quel attribut rend un champ de formulaire obligatoire ?",
   "options": ["required", "mandatory", "validate"], "reponse": ["required"],
   "explication": "Le navigateur bloque l'envoi tant que le champ est vide."},
  {"id": "html-5", "theme": "HTML", "niveau": "avance", "type": "saisie_libre",
   "question": "Écrivez la déclaration de type de document HTML5.",
   "reponse": ["<!DOCTYPE html>"],
   "explication": "Sans elle, le navigateur passe en mode quirks."},
  {"id": "html-6", "theme": "HTML", "niveau": "avance", "type": "choix_simple",
   "question": "Quel attribut de `<script>` diffère l'exécution après l'analyse du document ?",
   "options": ["async", "defer", "lazy"], "reponse": ["defer"],
   "explication": "`async` exécute dès le téléchargement, `defer` attend la fin de l'analyse."}
]
"##;

const CSS_BANK: &str = r##"[
  {"id": "css-1", "theme": "CSS", "niveau": "debutant", "type": "choix_simple",
   "question": "Quelle propriété change la couleur du texte ?",
   "options": ["color", "font-color", "text-color"], "reponse": ["color"],
   "explication": "`font-color` et `text-color` n'existent pas."},
  {"id": "css-2", "theme": "CSS", "niveau": "debutant", "type": "zone_saisie",
   "question": "Quel caractère préfixe un sélecteur d'identifiant ?",
   "reponse": ["#"],
   "explication": "`.` préfixe une classe, `#` un identifiant."},
  {"id": "css-3", "theme": "CSS", "niveau": "intermediaire", "type": "choix_multiple",
   "question": "Quelles valeurs de `position` retirent l'élément du flux normal ?",
   "options": ["absolute", "fixed", "relative", "static"], "reponse": ["absolute", "fixed"],
   "explication": "`relative` décale l'élément mais garde sa place."},
  {"id": "css-4", "theme": "CSS", "niveau": "intermediaire", "type": "saisie_libre",
   "question": "Écrivez la déclaration qui transforme un conteneur en flexbox.",
   "reponse": ["display: flex;"],
   "explication": "Les enfants directs deviennent des éléments flexibles."},
  {"id": "css-5", "theme": "CSS", "niveau": "avance", "type": "choix_simple",
   "question": "Quel sélecteur a la plus forte spécificité ?",
   "options": ["#menu a", "nav .lien a", ".menu a:hover"], "reponse": ["#menu a"],
   "explication": "Un identifiant l'emporte sur n'importe quel nombre de classes."},
  {"id": "css-6", "theme": "CSS", "niveau": "avance", "type": "zone_saisie",
   "question": "Quelle fonction calcule une taille à partir d'unités mixtes ?",
   "reponse": ["calc()", "calc"],
   "explication": "Par exemple ```width: calc(100% - 2rem);```"}
]
"##;

const JAVASCRIPT_BANK: &str = r##"[
  {"id": "js-1", "theme": "JavaScript", "niveau": "debutant", "type": "choix_simple",
   "question": "Quel mot-clé déclare une constante ?",
   "options": ["const", "let", "var"], "reponse": ["const"],
   "explication": "Une liaison `const` ne peut pas être réaffectée."},
  {"id": "js-2", "theme": "JavaScript", "niveau": "debutant", "type": "zone_saisie",
   "question": "Quel opérateur compare sans conversion de type ?",
   "reponse": ["==="],
   "explication": "`==` convertit les opérandes avant de comparer."},
  {"id": "js-3", "theme": "JavaScript", "niveau": "intermediaire", "type": "choix_multiple",
   "question": "Quelles méthodes renvoient un nouveau tableau ?",
   "options": ["map", "filter", "forEach", "push"], "reponse": ["map", "filter"],
   "explication": "`forEach` renvoie undefined et `push` modifie le tableau."},
  {"id": "js-4", "theme": "JavaScript", "niveau": "intermediaire", "type": "saisie_libre",
   "question": "Écrivez l'appel qui affiche `bonjour` dans la console.",
   "reponse": ["console.log('bonjour');", "console.log(\"bonjour\");"],
   "explication": "Le point-virgule final est facultatif."},
  {"id": "js-5", "theme": "JavaScript", "niveau": "avance", "type": "choix_simple",
   "question": "Que renvoie une fonction `async` ?",
   "options": ["Une Promise", "Un callback", "Un générateur"], "reponse": ["Une Promise"],
   "explication": "La valeur retournée est enveloppée dans une Promise."},
  {"id": "js-6", "theme": "JavaScript", "niveau": "avance", "type": "zone_saisie",
   "question": "Quel mot-clé suspend une fonction async jusqu'à la résolution d'une promesse ?",
   "reponse": ["await"],
   "explication": "`await` n'est valide que dans une fonction async ou un module."}
]
"##;

const PHP_BANK: &str = r##"[
  {"id": "php-1", "theme": "PHP", "niveau": "debutant", "type": "choix_simple",
   "question": "Quel symbole préfixe les variables ?",
   "options": ["$", "@", "&"], "reponse": ["$"],
   "explication": "`@` masque les erreurs, `&` prend une référence."},
  {"id": "php-2", "theme": "PHP", "niveau": "debutant", "type": "zone_saisie",
   "question": "Quelle instruction affiche du texte ?",
   "reponse": ["echo", "print"],
   "explication": "`echo` accepte plusieurs arguments, `print` un seul."},
  {"id": "php-3", "theme": "PHP", "niveau": "intermediaire", "type": "choix_multiple",
   "question": "Quelles superglobales contiennent des données de formulaire ?",
   "options": ["$_GET", "$_POST", "$_SERVER", "$GLOBALS"], "reponse": ["$_GET", "$_POST"],
   "explication": "`$_SERVER` décrit la requête et l'environnement."},
  {"id": "php-4", "theme": "PHP", "niveau": "intermediaire", "type": "saisie_libre",
   "question": "Écrivez la ligne qui démarre une session.",
   "reponse": ["session_start();"],
   "explication": "À appeler avant tout envoi de contenu."},
  {"id": "php-5", "theme": "PHP", "niveau": "avance", "type": "choix_simple",
   "question": "Quelle fonction protège une sortie HTML contre le XSS ?",
   "options": ["htmlspecialchars", "strip_tags", "addslashes"], "reponse": ["htmlspecialchars"],
   "explication": "Elle échappe `<`, `>`, `&` et les guillemets."},
  {"id": "php-6", "theme": "PHP", "niveau": "avance", "type": "zone_saisie",
   "question": "Quel opérateur renvoie la valeur de gauche si elle existe et n'est pas null ?",
   "reponse": ["??"],
   "explication": "L'opérateur de fusion null évite un `isset()` explicite."}
]
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use quizbank_core::model::{Question, QuestionType, Theme};

    #[test]
    fn sample_banks_parse() {
        for (file, content) in SAMPLE_BANKS {
            let questions: Vec<Question> = serde_json::from_str(content)
                .unwrap_or_else(|e| panic!("{file} does not parse: {e}"));
            assert_eq!(questions.len(), 6, "{file}");
            for q in &questions {
                assert!(!matches!(q.theme, Theme::Other(_)), "{}", q.id);
                assert!(!matches!(q.kind, QuestionType::Unknown(_)), "{}", q.id);
                assert!(!q.answers.is_empty(), "{}", q.id);
                if q.kind.is_choice() {
                    for answer in &q.answers {
                        assert!(q.options.contains(answer), "{}", q.id);
                    }
                }
            }
        }
    }

    #[test]
    fn sample_config_parses() {
        let config: quizbank_corpus::QuizbankConfig = toml::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.themes.len(), SAMPLE_BANKS.len());
        for (theme, (file, _)) in config.themes.iter().zip(SAMPLE_BANKS) {
            assert_eq!(theme.file, file);
        }
    }
}
