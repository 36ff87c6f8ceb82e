use syn::{
    punctuated::Punctuated, spanned::Spanned, Attribute, Expr, ExprLit, Lit, LitStr, Meta, Token,
};

/// Field annotation as it will be reported to the runtime.
#[derive(Clone)]
pub(crate) enum FieldAnnotation {
    Absent,
    Urlenc(LitStr),
    Fallback(LitStr),
}

pub(crate) fn ensure_no_urlenc_attrs(attrs: &[Attribute], ctx: &str) -> syn::Result<()> {
    for a in attrs {
        if a.path().is_ident("urlenc") {
            return Err(syn::Error::new(
                a.span(),
                format!("`#[urlenc]` is not supported on {ctx}"),
            ));
        }
    }
    Ok(())
}

/// Accepts `#[urlenc = "..."]` and `#[urlenc("...")]`. Without either, a
/// `#[serde(rename = "...")]` or `#[serde(skip)]` on the same field is used.
pub(crate) fn parse_field_annotation(attrs: &[Attribute]) -> syn::Result<FieldAnnotation> {
    let mut urlenc: Option<LitStr> = None;
    for attr in attrs {
        if !attr.path().is_ident("urlenc") {
            continue;
        }
        let lit = match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => s.clone(),
                other => {
                    return Err(syn::Error::new(
                        other.span(),
                        "expected a string literal: `#[urlenc = \"name,omitempty,type\"]`",
                    ))
                }
            },
            Meta::List(_) => attr.parse_args::<LitStr>()?,
            Meta::Path(p) => {
                return Err(syn::Error::new(
                    p.span(),
                    "missing annotation text: `#[urlenc = \"name,omitempty,type\"]`",
                ))
            }
        };
        if urlenc.is_some() {
            return Err(syn::Error::new(attr.span(), "duplicate `#[urlenc]` annotation"));
        }
        urlenc = Some(lit);
    }

    if let Some(lit) = urlenc {
        return Ok(FieldAnnotation::Urlenc(lit));
    }
    Ok(serde_fallback(attrs).map_or(FieldAnnotation::Absent, FieldAnnotation::Fallback))
}

/// Only `rename = "..."` and `skip` are read. Anything serde itself rejects is
/// left for serde to report.
fn serde_fallback(attrs: &[Attribute]) -> Option<LitStr> {
    let mut rename = None;
    let mut skip = None;
    for attr in attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }
        let Ok(metas) = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
        else {
            continue;
        };
        for meta in metas {
            match meta {
                Meta::Path(p) if p.is_ident("skip") => {
                    skip = Some(LitStr::new("-", p.span()));
                }
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    if let Expr::Lit(ExprLit {
                        lit: Lit::Str(s), ..
                    }) = nv.value
                    {
                        rename = Some(s);
                    }
                }
                _ => {}
            }
        }
    }
    skip.or(rename)
}
