//! Minimal server-rendered pages. No templating engine; the pages are plain
//! HTML strings with escaped user data.

use axum::response::Html;

use crate::rackets::repo::Racket;

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html lang=\"es\">\n<head><meta charset=\"utf-8\">\
         <title>{}</title></head>\n<body>\n{}\n</body>\n</html>",
        escape(title),
        body
    ))
}

fn flash_banner(flash: Option<&str>) -> String {
    match flash {
        Some(msg) => format!("<p class=\"flash\">{}</p>", escape(msg)),
        None => String::new(),
    }
}

pub fn racket_list(rackets: &[Racket], flash: Option<&str>) -> Html<String> {
    let mut rows = String::new();
    for r in rackets {
        rows.push_str(&format!(
            "<tr><td><a href=\"/raquetas/{id}\">{marca}</a></td>\
             <td>{modelo}</td><td>{precio}</td><td>{peso}</td><td>{material}</td>\
             <td><a href=\"/raquetas/edit/{id}\">editar</a> \
             <a href=\"#\" onclick=\"fetch('/raquetas/{id}',{{method:'DELETE'}})\
.then(()=>location.reload());return false\">borrar</a></td></tr>\n",
            id = r.id,
            marca = escape(&r.brand),
            modelo = escape(&r.model),
            precio = r.price,
            peso = r.weight,
            material = escape(&r.material),
        ));
    }
    let body = format!(
        "{flash}<h1>Raquetas</h1>\n<table>\n<tr><th>Marca</th><th>Modelo</th>\
         <th>Precio</th><th>Peso</th><th>Material</th><th></th></tr>\n{rows}</table>\n\
         <p><a href=\"/raquetas/nueva\">Nueva raqueta</a> <a href=\"/login\">Login</a></p>",
        flash = flash_banner(flash),
        rows = rows,
    );
    layout("Raquetas", &body)
}

pub fn racket_detail(r: &Racket) -> Html<String> {
    let body = format!(
        "<h1>{marca} {modelo}</h1>\n<ul>\
         <li>Precio: {precio}</li><li>Peso: {peso}</li><li>Material: {material}</li></ul>\n\
         <p><a href=\"/raquetas\">Volver</a></p>",
        marca = escape(&r.brand),
        modelo = escape(&r.model),
        precio = r.price,
        peso = r.weight,
        material = escape(&r.material),
    );
    layout("Raqueta", &body)
}

fn racket_fields(r: Option<&Racket>) -> String {
    let (marca, precio, modelo, peso, material) = match r {
        Some(r) => (
            escape(&r.brand),
            r.price.to_string(),
            escape(&r.model),
            r.weight.to_string(),
            escape(&r.material),
        ),
        None => Default::default(),
    };
    format!(
        "<label>Marca <input name=\"marca\" value=\"{marca}\" required></label><br>\
         <label>Precio <input name=\"precio\" type=\"number\" step=\"any\" value=\"{precio}\" required></label><br>\
         <label>Modelo <input name=\"modelo\" value=\"{modelo}\" required></label><br>\
         <label>Peso <input name=\"peso\" type=\"number\" step=\"any\" value=\"{peso}\" required></label><br>\
         <label>Material <input name=\"material\" value=\"{material}\" required></label><br>"
    )
}

pub fn racket_new_form() -> Html<String> {
    let body = format!(
        "<h1>Nueva raqueta</h1>\n\
         <form method=\"post\" action=\"/raquetas\">\n{}\n\
         <button type=\"submit\">Crear</button>\n</form>\n\
         <form method=\"post\" action=\"/subir\" enctype=\"multipart/form-data\">\n\
         <label>Archivo <input type=\"file\" name=\"archivo\"></label>\n\
         <button type=\"submit\">Subir</button>\n</form>",
        racket_fields(None)
    );
    layout("Nueva raqueta", &body)
}

pub fn racket_edit_form(r: &Racket) -> Html<String> {
    // HTML forms cannot PUT; submit via fetch like the login page does.
    let body = format!(
        "<h1>Editar raqueta</h1>\n\
         <form id=\"edit-form\">\n{fields}\n<button type=\"submit\">Guardar</button>\n</form>\n\
         <script>\n\
         document.getElementById('edit-form').addEventListener('submit', function(e) {{\n\
           e.preventDefault();\n\
           fetch('/raquetas/{id}', {{ method: 'PUT', body: new URLSearchParams(new FormData(this)) }})\n\
             .then(() => {{ window.location.href = '/raquetas'; }});\n\
         }});\n\
         </script>",
        fields = racket_fields(Some(r)),
        id = r.id,
    );
    layout("Editar raqueta", &body)
}

pub fn login_page(flash: Option<&str>) -> Html<String> {
    let body = format!(
        "{flash}<h1>Login</h1>\n\
         <form id=\"login-form\">\n\
         <label>Email <input id=\"email\" name=\"email\" type=\"email\" required></label><br>\n\
         <label>Contrase\u{f1}a <input id=\"contrasena\" name=\"contrasena\" type=\"password\" required></label><br>\n\
         <button type=\"submit\">Entrar</button>\n</form>\n\
         <p><a href=\"/raquetas\">Volver</a></p>\n\
         <script>\n\
         document.getElementById('login-form').addEventListener('submit', function(e) {{\n\
           e.preventDefault();\n\
           const email = document.getElementById('email').value;\n\
           const contrasena = document.getElementById('contrasena').value;\n\
           fetch('/login', {{\n\
             method: 'POST',\n\
             headers: {{ 'Content-Type': 'application/json' }},\n\
             body: JSON.stringify({{ email, contrasena }})\n\
           }})\n\
           .then(r => r.json())\n\
           .then(data => {{\n\
             if (data.message === 'Login exitoso') {{ window.location.href = '/raquetas'; }}\n\
             else {{ alert('Login fallido: ' + (data.error || data.message)); }}\n\
           }});\n\
         }});\n\
         </script>",
        flash = flash_banner(flash),
    );
    layout("Login", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn sample() -> Racket {
        Racket {
            id: Uuid::new_v4(),
            brand: "Wilson <script>".into(),
            price: 180.0,
            model: "Pro Staff".into(),
            weight: 305.0,
            material: "Grafito".into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape("<b>\"a\" & 'b'</b>"),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn list_escapes_record_fields_and_shows_flash() {
        let html = racket_list(&[sample()], Some("Raqueta creada")).0;
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("Raqueta creada"));
    }

    #[test]
    fn list_without_flash_has_no_banner() {
        let html = racket_list(&[], None).0;
        assert!(!html.contains("class=\"flash\""));
    }

    #[test]
    fn forms_carry_the_original_field_names() {
        let html = racket_new_form().0;
        for name in ["marca", "precio", "modelo", "peso", "material", "archivo"] {
            assert!(html.contains(&format!("name=\"{name}\"")), "missing {name}");
        }
    }

    #[test]
    fn edit_form_prefills_current_values() {
        let r = sample();
        let html = racket_edit_form(&r).0;
        assert!(html.contains("value=\"Pro Staff\""));
        assert!(html.contains(&format!("/raquetas/{}", r.id)));
    }
}
