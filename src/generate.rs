//! Django REST Framework code generation from a model-name list.
//!
//! Pure string templating: the same input list always yields byte-identical
//! output, which is what makes this stage trivially testable on its own.
//! Names are used exactly as extracted — duplicates produce duplicate
//! members, and endpoint names are naive plurals (lower-case + `s`, so
//! `Category` becomes `categorys` by design of the template).

/// The three generated documents for one pipeline run. Computed once,
/// immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifactSet {
    pub serializers: String,
    pub views: String,
    pub urls: String,
}

impl GeneratedArtifactSet {
    /// Generate all three documents from the ordered model-name list.
    pub fn from_models(models: &[String]) -> Self {
        Self {
            serializers: generate_serializers(models),
            views: generate_views(models),
            urls: generate_urls(models),
        }
    }

    /// `(filename, content)` pairs in publication order.
    pub fn files(&self) -> [(&'static str, &str); 3] {
        [
            ("serializers.py", self.serializers.as_str()),
            ("views.py", self.views.as_str()),
            ("urls.py", self.urls.as_str()),
        ]
    }
}

/// `serializers.py`: one import header naming every model, then one
/// `ModelSerializer` bound to all fields per model.
pub fn generate_serializers(models: &[String]) -> String {
    let header = format!(
        "from rest_framework import serializers\nfrom .models import {}\n\n",
        models.join(", ")
    );
    let mut body = String::new();
    for model in models {
        body.push_str(&format!("class {}Serializer(serializers.ModelSerializer):\n", model));
        body.push_str("    class Meta:\n");
        body.push_str(&format!("        model = {}\n", model));
        body.push_str("        fields = '__all__'\n\n");
    }
    header + &body
}

/// `views.py`: imports every model and serializer, then one full-CRUD
/// `ModelViewSet` per model over its unfiltered query set.
pub fn generate_views(models: &[String]) -> String {
    let serializer_imports: Vec<String> =
        models.iter().map(|m| format!("{}Serializer", m)).collect();
    let header = format!(
        "from rest_framework import viewsets\nfrom .models import {}\nfrom .serializers import {}\n\n",
        models.join(", "),
        serializer_imports.join(", ")
    );
    let mut body = String::new();
    for model in models {
        body.push_str(&format!("class {}ViewSet(viewsets.ModelViewSet):\n", model));
        body.push_str(&format!("    queryset = {}.objects.all()\n", model));
        body.push_str(&format!("    serializer_class = {}Serializer\n\n", model));
    }
    header + &body
}

/// `urls.py`: router construction, one registration line per model mapping
/// the pluralized-lowercase endpoint to its viewset, then the export footer.
pub fn generate_urls(models: &[String]) -> String {
    let viewset_imports: Vec<String> = models.iter().map(|m| format!("{}ViewSet", m)).collect();
    let header = format!(
        "from rest_framework.routers import DefaultRouter\nfrom .views import {}\n\n",
        viewset_imports.join(", ")
    );
    let mut body = String::from("router = DefaultRouter()\n");
    for model in models {
        let endpoint = format!("{}s", model.to_lowercase());
        body.push_str(&format!("router.register(r'{}', {}ViewSet)\n", endpoint, model));
    }
    body.push_str("\nurlpatterns = router.urls\n");
    header + &body
}

#[cfg(test)]
mod tests {
    use super::*;

    fn models(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn serializers_declare_one_block_per_model() {
        let out = generate_serializers(&models(&["Book", "Author"]));
        assert!(out.starts_with("from rest_framework import serializers\n"));
        assert!(out.contains("from .models import Book, Author\n"));
        assert!(out.contains("class BookSerializer(serializers.ModelSerializer):\n"));
        assert!(out.contains("class AuthorSerializer(serializers.ModelSerializer):\n"));
        assert!(out.contains("        model = Book\n"));
        assert!(out.contains("        model = Author\n"));
        assert!(out.contains("        fields = '__all__'\n"));
    }

    #[test]
    fn views_import_models_and_serializers() {
        let out = generate_views(&models(&["Book", "Author"]));
        assert!(out.contains("from .models import Book, Author\n"));
        assert!(out.contains("from .serializers import BookSerializer, AuthorSerializer\n"));
        assert!(out.contains("class BookViewSet(viewsets.ModelViewSet):\n"));
        assert!(out.contains("    queryset = Book.objects.all()\n"));
        assert!(out.contains("    serializer_class = AuthorSerializer\n"));
    }

    #[test]
    fn urls_register_endpoints_in_model_order() {
        let out = generate_urls(&models(&["Book", "Author"]));
        assert!(out.contains("from .views import BookViewSet, AuthorViewSet\n"));
        let books = out.find("router.register(r'books', BookViewSet)").unwrap();
        let authors = out.find("router.register(r'authors', AuthorViewSet)").unwrap();
        assert!(books < authors);
        assert!(out.ends_with("\nurlpatterns = router.urls\n"));
    }

    #[test]
    fn pluralization_is_naive_by_design() {
        // "categorys" is the conformance target, not a typo.
        let out = generate_urls(&models(&["Category"]));
        assert!(out.contains("router.register(r'categorys', CategoryViewSet)\n"));
        assert!(!out.contains("categories"));
    }

    #[test]
    fn generation_is_deterministic() {
        let list = models(&["Book", "Author", "Category"]);
        let first = GeneratedArtifactSet::from_models(&list);
        let second = GeneratedArtifactSet::from_models(&list);
        assert_eq!(first, second);
    }

    #[test]
    fn duplicate_models_produce_duplicate_members() {
        let out = generate_serializers(&models(&["Book", "Book"]));
        assert_eq!(out.matches("class BookSerializer").count(), 2);
        assert!(out.contains("from .models import Book, Book\n"));
    }

    #[test]
    fn single_model_set_is_self_consistent() {
        let set = GeneratedArtifactSet::from_models(&models(&["Reader"]));
        assert!(set.serializers.contains("class ReaderSerializer"));
        assert!(set.views.contains("from .serializers import ReaderSerializer"));
        assert!(set.urls.contains("from .views import ReaderViewSet"));
    }

    #[test]
    fn files_are_in_publication_order() {
        let set = GeneratedArtifactSet::from_models(&models(&["Book"]));
        let names: Vec<&str> = set.files().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["serializers.py", "views.py", "urls.py"]);
    }
}
