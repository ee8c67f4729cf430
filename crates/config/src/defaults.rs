//! Defaults and the bootstrap template for the menu document.

/// Hotkey used when the document has no `settings.hotkey` entry.
pub const DEFAULT_HOTKEY: &str = "ctrl+alt+space";

/// Template written to disk when no menu document exists yet. Kept bilingual
/// (CZ + EN); no behavior depends on the comments.
pub const DEFAULT_YAML: &str = r#"# ================================
#  KONFIG: Rychlé menu  (CZ)
#
#  JAK PŘIDAT POLOŽKY:
#  - Otevřít URL v prohlížeči:
#      - label: "Google"
#        open: "https://www.google.com"
#
#  - Otevřít soubor/složku:
#      - label: "Moje složka"
#        path: "/home/me/Documents"
#
#  - Spustit program/příkaz (volitelně s argumenty):
#      - label: "Editor"
#        cmd: "gedit"
#        args: ["/tmp/readme.txt"]
#
#  - Podmenu (libovolná hloubka):
#      - label: "Google"
#        items:
#          - label: "Záložky"
#            items:
#              - label: "Moje stránka"
#                open: "https://example.com"
#
#  - Oddělovač:
#      - separator: true
#
#  - Ukončit aplikaci (kompletně zavře program):
#      - label: "Konec"
#        action: exit
#
#  PRAVIDLA:
#   • Každá položka má buď "items" (podmenu), NEBO jednu akci:
#     open/path/cmd/action, NEBO "separator: true".
#   • "args" je volitelné pole (jen k "cmd").
#   • Vnoření "items" může být libovolně hluboké.
# ================================
#
# ================================
#  CONFIG: Quick Menu  (EN)
#
#  HOW TO ADD ITEMS:
#  - Open a URL in the browser:
#      - label: "Google"
#        open: "https://www.google.com"
#
#  - Open a file/folder:
#      - label: "My folder"
#        path: "/home/me/Documents"
#
#  - Run a program/command (optional args):
#      - label: "Editor"
#        cmd: "gedit"
#        args: ["/tmp/readme.txt"]
#
#  - Submenu (any depth):
#      - label: "Google"
#        items:
#          - label: "Bookmarks"
#            items:
#              - label: "My page"
#                open: "https://example.com"
#
#  - Separator:
#      - separator: true
#
#  - Quit the app (completely closes the program):
#      - label: "Exit"
#        action: exit
#
#  RULES:
#   • Each entry must have either "items" (submenu), OR exactly one action:
#     open/path/cmd/action, OR "separator: true".
#   • "args" is optional (only with "cmd").
#   • "items" can be nested arbitrarily.
# ================================

settings:
  hotkey: "ctrl+alt+space"

menu:
  - label: "Google"
    items:
      - label: "Záložky / Bookmarks"
        items:
          - label: "Moje stránka / My page"
            open: "https://example.com"
      - label: "Vyhledávání / Search"
        open: "https://www.google.com"

  - label: "Práce / Work"
    items:
      - label: "Confluence"
        open: "https://confluence.example.com"
      - label: "Kibana"
        open: "https://kibana.example.com"
      - label: "Sdílená složka / Shared folder"
        path: "/srv/shared"

  - separator: true

  - label: "Konec / Exit"
    action: exit
"#;
